//! Break-over notification sinks.
//!
//! The controller calls [`NotificationSink::notify`] once per completed
//! break. Errors are logged by the caller and never stop the timer.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::error::NotifyError;
use crate::storage::NotificationsConfig;

pub trait NotificationSink {
    fn notify(&self) -> Result<(), NotifyError>;
}

/// Does nothing. Used when notifications are disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl NotificationSink for Silent {
    fn notify(&self) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Rings the terminal bell on stderr. Stdout carries status and JSON output.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl NotificationSink for TerminalBell {
    fn notify(&self) -> Result<(), NotifyError> {
        let mut out = std::io::stderr().lock();
        out.write_all(b"\x07").map_err(NotifyError::Bell)?;
        out.flush().map_err(NotifyError::Bell)
    }
}

/// Launches an external player, e.g. `paplay --volume={volume} bell.oga`.
///
/// The command line is split on whitespace. `{volume}` in any argument is
/// replaced by the configured percentage. The player is spawned and not
/// waited on.
#[derive(Debug, Clone)]
pub struct SoundCommand {
    command_line: String,
    volume: u32,
}

impl SoundCommand {
    pub fn new(command_line: impl Into<String>, volume: u32) -> Self {
        Self {
            command_line: command_line.into(),
            volume,
        }
    }

    fn argv(&self) -> Vec<String> {
        let volume = self.volume.to_string();
        self.command_line
            .split_whitespace()
            .map(|arg| arg.replace("{volume}", &volume))
            .collect()
    }
}

impl NotificationSink for SoundCommand {
    fn notify(&self) -> Result<(), NotifyError> {
        let argv = self.argv();
        let (program, args) = argv.split_first().ok_or(NotifyError::EmptyCommand)?;
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|source| NotifyError::Spawn {
                command: self.command_line.clone(),
                source,
            })
    }
}

/// Pick the sink described by the notification settings.
pub fn sink_from_config(config: &NotificationsConfig) -> Box<dyn NotificationSink> {
    if !config.enabled {
        return Box::new(Silent);
    }
    match config.sound_command.as_deref().map(str::trim) {
        Some(cmd) if !cmd.is_empty() => Box::new(SoundCommand::new(cmd, config.volume)),
        _ => Box::new(TerminalBell),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_placeholder_is_substituted() {
        let sound = SoundCommand::new("paplay --volume={volume} /tmp/bell.oga", 20);
        assert_eq!(
            sound.argv(),
            vec!["paplay", "--volume=20", "/tmp/bell.oga"]
        );
    }

    #[test]
    fn empty_command_fails() {
        let sound = SoundCommand::new("   ", 20);
        assert!(matches!(sound.notify(), Err(NotifyError::EmptyCommand)));
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        let sound = SoundCommand::new("/nonexistent/flowmodoro-player", 20);
        assert!(matches!(sound.notify(), Err(NotifyError::Spawn { .. })));
    }

    #[test]
    fn silent_always_succeeds() {
        assert!(Silent.notify().is_ok());
    }
}

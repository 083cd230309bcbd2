//! Config file commands.
//!
//! Every action works on `config.toml` in the data directory. A missing file
//! is created with defaults on first use.

use std::path::Path;

use clap::Subcommand;
use flowmodoro_core::timer::tick_period;
use flowmodoro_core::{Config, ConfigError};

use crate::common::CliResult;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one value
    Get {
        /// Dotted key, e.g. "timer.tick_interval_ms" or "notifications.volume"
        key: String,
    },
    /// Change one value; rejected values leave the file untouched
    Set { key: String, value: String },
    /// Print the whole config
    List {
        /// Print JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
    /// Print where the config file lives
    Path,
    /// Validate the file and describe the effective settings
    Check,
    /// Overwrite the file with defaults
    Reset,
}

pub fn run(action: ConfigAction) -> CliResult {
    run_at(action, &Config::path()?)
}

fn run_at(action: ConfigAction, path: &Path) -> CliResult {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load_from(path)?;
            let value = config.get(&key).ok_or(ConfigError::UnknownKey(key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_from(path)?;
            config.apply(&key, &value)?;
            config.save_to(path)?;
            if let Some(stored) = config.get(&key) {
                println!("{key} = {stored}");
            }
        }
        ConfigAction::List { json } => {
            let config = Config::load_from(path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", toml::to_string_pretty(&config)?);
            }
        }
        ConfigAction::Path => println!("{}", path.display()),
        ConfigAction::Check => {
            let config = Config::load_from(path)?;
            config.validate()?;
            println!("{}: ok", path.display());
            println!("{}", describe(&config));
        }
        ConfigAction::Reset => {
            Config::default().save_to(path)?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}

/// Human summary of what `run` will do with this config.
fn describe(config: &Config) -> String {
    let period = tick_period(config.timer.tick_interval_ms);
    let notify = &config.notifications;
    let sink = match notify.sound_command.as_deref().map(str::trim) {
        _ if !notify.enabled => "off".to_string(),
        Some(cmd) if !cmd.is_empty() => format!("`{cmd}` at volume {}", notify.volume),
        _ => "terminal bell".to_string(),
    };
    format!("tick every {}ms, break alert: {sink}", period.as_millis())
}

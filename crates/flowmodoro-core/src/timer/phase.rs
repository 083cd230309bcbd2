use serde::{Deserialize, Serialize};

/// The kind of a timed segment, and of a session log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Work,
    Break,
}

impl SessionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionKind::Work => "work",
            SessionKind::Break => "break",
        }
    }
}

/// Coarse mode: which way the clock runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Standby,
    Work,
    Break,
}

/// The five states of the timer.
///
/// The paused states remember which segment they interrupted, so there is no
/// separate "paused mode" field to keep in sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    Standby,
    WorkRunning,
    WorkPaused,
    BreakRunning,
    BreakPaused,
}

impl TimerPhase {
    pub fn mode(self) -> Mode {
        match self {
            TimerPhase::Standby => Mode::Standby,
            TimerPhase::WorkRunning | TimerPhase::WorkPaused => Mode::Work,
            TimerPhase::BreakRunning | TimerPhase::BreakPaused => Mode::Break,
        }
    }

    pub fn is_running(self) -> bool {
        matches!(self, TimerPhase::WorkRunning | TimerPhase::BreakRunning)
    }

    /// Which segment a paused phase interrupted.
    pub fn paused_mode(self) -> Option<SessionKind> {
        match self {
            TimerPhase::WorkPaused => Some(SessionKind::Work),
            TimerPhase::BreakPaused => Some(SessionKind::Break),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paused_mode_only_in_paused_phases() {
        assert_eq!(TimerPhase::WorkPaused.paused_mode(), Some(SessionKind::Work));
        assert_eq!(TimerPhase::BreakPaused.paused_mode(), Some(SessionKind::Break));
        assert_eq!(TimerPhase::WorkRunning.paused_mode(), None);
        assert_eq!(TimerPhase::Standby.paused_mode(), None);
    }

    #[test]
    fn running_phases() {
        assert!(TimerPhase::WorkRunning.is_running());
        assert!(TimerPhase::BreakRunning.is_running());
        assert!(!TimerPhase::BreakPaused.is_running());
        assert!(!TimerPhase::Standby.is_running());
    }

    #[test]
    fn session_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&SessionKind::Work).unwrap(), "\"work\"");
        assert_eq!(serde_json::to_string(&SessionKind::Break).unwrap(), "\"break\"");
    }
}

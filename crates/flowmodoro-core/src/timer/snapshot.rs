use serde::{Deserialize, Serialize};

use super::phase::{Mode, SessionKind, TimerPhase};

/// Everything a front end needs to draw the timer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    pub mode: Mode,
    pub is_running: bool,
    pub paused_mode: Option<SessionKind>,
    pub elapsed_ms: u64,
    /// Countdown left; only present during a break.
    pub remaining_ms: Option<u64>,
    pub break_duration_ms: u64,
    pub total_work_ms: u64,
    /// 1.0 at break start, 0.0 at break end. Work has no bounded ratio.
    pub progress: Option<f64>,
    /// Clock face text.
    pub display: String,
    pub header: String,
    pub mode_label: String,
    pub controls: Controls,
}

/// Which controls are live and what they say.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub start_label: String,
    pub stop_enabled: bool,
    pub reset_enabled: bool,
    pub reset_label: String,
}

impl Controls {
    pub fn for_phase(phase: TimerPhase) -> Self {
        let start_label = match phase {
            TimerPhase::WorkRunning | TimerPhase::BreakRunning => "Pause",
            TimerPhase::WorkPaused | TimerPhase::BreakPaused => "Resume",
            TimerPhase::Standby => "Start",
        };
        let reset_label = match phase.mode() {
            Mode::Break => "Skip Break",
            Mode::Work | Mode::Standby => "Reset",
        };
        Self {
            start_label: start_label.into(),
            stop_enabled: phase == TimerPhase::WorkRunning,
            reset_enabled: phase != TimerPhase::Standby,
            reset_label: reset_label.into(),
        }
    }
}

pub(crate) fn header_for(phase: TimerPhase) -> &'static str {
    match phase {
        TimerPhase::WorkRunning => "Work in Progress",
        TimerPhase::BreakRunning => "Break in Progress",
        TimerPhase::WorkPaused => "Work Paused",
        TimerPhase::BreakPaused => "Break Paused",
        TimerPhase::Standby => "Flowmodoro",
    }
}

pub(crate) fn mode_label_for(phase: TimerPhase) -> &'static str {
    match phase {
        TimerPhase::WorkRunning => "Work",
        TimerPhase::BreakRunning => "Break",
        TimerPhase::WorkPaused => "Paused (Work)",
        TimerPhase::BreakPaused => "Paused (Break)",
        TimerPhase::Standby => "Standby",
    }
}

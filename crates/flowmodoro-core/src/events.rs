use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{SessionKind, TimerPhase};

/// Every state change in the timer produces an Event.
/// Front ends render from them; the controller turns some into log entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    WorkStarted {
        at: DateTime<Utc>,
    },
    Paused {
        mode: SessionKind,
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    Resumed {
        mode: SessionKind,
        elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    /// Work ended by the user; the earned break has started.
    WorkStopped {
        work_ms: u64,
        break_ms: u64,
        total_work_ms: u64,
        at: DateTime<Utc>,
    },
    /// A break ran to zero. Fired once per break, never for a skipped one.
    BreakCompleted {
        break_ms: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        from: TimerPhase,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// True when the event starts a segment counting and ticks are needed.
    pub fn starts_clock(&self) -> bool {
        matches!(
            self,
            Event::WorkStarted { .. } | Event::Resumed { .. } | Event::WorkStopped { .. }
        )
    }

    /// True when the event leaves the clock stopped.
    pub fn stops_clock(&self) -> bool {
        matches!(
            self,
            Event::Paused { .. } | Event::BreakCompleted { .. } | Event::TimerReset { .. }
        )
    }
}

mod clock;
mod engine;
mod format;
mod phase;
mod snapshot;
mod ticker;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{Command, TimerEngine};
pub use format::{
    break_duration_for, format_clock, parse_clock, progress_ratio, BREAK_RATIO, MIN_BREAK_MS,
};
pub use phase::{Mode, SessionKind, TimerPhase};
pub use snapshot::{Controls, TimerSnapshot};
pub use ticker::{tick_period, ManualTicker, TickSource, DEFAULT_TICK_MS, MAX_TICK_MS};

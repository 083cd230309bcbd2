//! # Flowmodoro Core Library
//!
//! Core logic for the Flowmodoro timer: work counts up for as long as you
//! stay in flow, then earns a break of one fifth of that time which counts
//! down. The CLI binary is a thin front end over this crate.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A monotonic-clock state machine that requires the
//!   caller to periodically invoke `tick()` while a segment is running
//! - **Controller**: [`Flowmodoro`] ties the engine to its tick source,
//!   session log, task list, panel flags and notification sink
//! - **Storage**: SQLite key/value store for persisted lists and flags,
//!   TOML-based configuration
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`Flowmodoro`]: Command dispatch, tick handling and persistence
//! - [`Database`]: Key/value persistence
//! - [`Config`]: Application configuration management

pub mod app;
pub mod error;
pub mod events;
pub mod notify;
pub mod panels;
pub mod session_log;
pub mod storage;
pub mod tasks;
pub mod timer;

pub use app::Flowmodoro;
pub use error::{ConfigError, CoreError, NotifyError, StorageError, ValidationError};
pub use events::Event;
pub use notify::{sink_from_config, NotificationSink, Silent, SoundCommand, TerminalBell};
pub use panels::{Panel, PanelState};
pub use session_log::{SessionCounts, SessionLog, SessionLogEntry};
pub use storage::{Config, Database, KvStore, MemoryStore};
pub use tasks::{Task, TaskList};
pub use timer::{
    Clock, Command, ManualClock, ManualTicker, Mode, SessionKind, SystemClock, TickSource,
    TimerEngine, TimerPhase, TimerSnapshot,
};

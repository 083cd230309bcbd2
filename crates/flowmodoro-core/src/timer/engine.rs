//! Timer engine implementation.
//!
//! The timer engine is a monotonic-clock state machine. It does not use
//! internal threads - the caller is responsible for calling `tick()` while a
//! segment is running.
//!
//! ## State Transitions
//!
//! ```text
//! Standby -> WorkRunning <-> WorkPaused
//! WorkRunning --stop--> BreakRunning <-> BreakPaused
//! BreakRunning --tick, break over--> Standby
//! any non-standby --reset--> Standby
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(SystemClock::new());
//! engine.dispatch(Command::Start);
//! // In a loop:
//! engine.tick(); // Returns Some(Event::BreakCompleted) when a break ends
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::clock::{Clock, SystemClock};
use super::format::{break_duration_for, format_clock, progress_ratio};
use super::phase::{Mode, SessionKind, TimerPhase};
use super::snapshot::{header_for, mode_label_for, Controls, TimerSnapshot};
use crate::events::Event;

/// Commands a front end can send to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Start work from standby, or resume a paused segment.
    Start,
    Pause,
    /// Pause when running, start/resume otherwise.
    Toggle,
    /// End work early and begin the earned break.
    StopWork,
    /// Abandon the current work or break without logging it.
    Reset,
}

/// Core timer engine.
///
/// Elapsed time is `banked + (now - segment_start)`. Pausing banks the
/// running total; resuming starts a new reference point. Nothing is ever
/// accumulated per tick.
#[derive(Debug)]
pub struct TimerEngine<C = SystemClock> {
    clock: C,
    phase: TimerPhase,
    /// Elapsed time frozen at the last pause.
    banked_ms: u64,
    /// Clock reading when the segment last started or resumed.
    segment_start_ms: Option<u64>,
    break_duration_ms: u64,
    total_work_ms: u64,
}

impl<C: Clock> TimerEngine<C> {
    /// Create a new engine in `Standby`.
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            phase: TimerPhase::Standby,
            banked_ms: 0,
            segment_start_ms: None,
            break_duration_ms: 0,
            total_work_ms: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn mode(&self) -> Mode {
        self.phase.mode()
    }

    pub fn is_running(&self) -> bool {
        self.phase.is_running()
    }

    pub fn paused_mode(&self) -> Option<SessionKind> {
        self.phase.paused_mode()
    }

    pub fn elapsed_ms(&self) -> u64 {
        match self.segment_start_ms {
            Some(start) => self
                .banked_ms
                .saturating_add(self.clock.now_ms().saturating_sub(start)),
            None => self.banked_ms,
        }
    }

    pub fn break_duration_ms(&self) -> u64 {
        self.break_duration_ms
    }

    pub fn total_work_ms(&self) -> u64 {
        self.total_work_ms
    }

    /// Break time left. `None` outside a break.
    pub fn remaining_ms(&self) -> Option<u64> {
        match self.mode() {
            Mode::Break => Some(self.break_duration_ms.saturating_sub(self.elapsed_ms())),
            Mode::Work | Mode::Standby => None,
        }
    }

    /// Break progress from 1.0 (just started) down to 0.0 (finished).
    pub fn progress(&self) -> Option<f64> {
        self.remaining_ms()
            .map(|remaining| progress_ratio(remaining, self.break_duration_ms))
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let elapsed_ms = self.elapsed_ms();
        let remaining_ms = self.remaining_ms();
        let display = match (self.mode(), remaining_ms) {
            (Mode::Break, Some(remaining)) => format_clock(remaining),
            (Mode::Work, _) => format_clock(elapsed_ms),
            _ => format_clock(0),
        };
        TimerSnapshot {
            phase: self.phase,
            mode: self.mode(),
            is_running: self.is_running(),
            paused_mode: self.paused_mode(),
            elapsed_ms,
            remaining_ms,
            break_duration_ms: self.break_duration_ms,
            total_work_ms: self.total_work_ms,
            progress: self.progress(),
            display,
            header: header_for(self.phase).into(),
            mode_label: mode_label_for(self.phase).into(),
            controls: Controls::for_phase(self.phase),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Apply a command. Returns `None` when the command does not apply to
    /// the current phase; the engine is left untouched in that case.
    pub fn dispatch(&mut self, command: Command) -> Option<Event> {
        match command {
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Toggle => {
                if self.is_running() {
                    self.pause()
                } else {
                    self.start()
                }
            }
            Command::StopWork => self.stop_work(),
            Command::Reset => self.reset(),
        }
    }

    pub fn start(&mut self) -> Option<Event> {
        match self.phase {
            TimerPhase::Standby => {
                self.banked_ms = 0;
                self.segment_start_ms = Some(self.clock.now_ms());
                self.phase = TimerPhase::WorkRunning;
                debug!("work started");
                Some(Event::WorkStarted { at: Utc::now() })
            }
            TimerPhase::WorkPaused | TimerPhase::BreakPaused => {
                let mode = self.phase.paused_mode()?;
                self.segment_start_ms = Some(self.clock.now_ms());
                self.phase = match mode {
                    SessionKind::Work => TimerPhase::WorkRunning,
                    SessionKind::Break => TimerPhase::BreakRunning,
                };
                debug!(mode = mode.as_str(), elapsed_ms = self.banked_ms, "resumed");
                Some(Event::Resumed {
                    mode,
                    elapsed_ms: self.banked_ms,
                    at: Utc::now(),
                })
            }
            TimerPhase::WorkRunning | TimerPhase::BreakRunning => None,
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        let mode = match self.phase {
            TimerPhase::WorkRunning => SessionKind::Work,
            TimerPhase::BreakRunning => SessionKind::Break,
            _ => return None,
        };
        // Freeze elapsed before dropping the reference point.
        self.banked_ms = self.elapsed_ms();
        self.segment_start_ms = None;
        self.phase = match mode {
            SessionKind::Work => TimerPhase::WorkPaused,
            SessionKind::Break => TimerPhase::BreakPaused,
        };
        debug!(mode = mode.as_str(), elapsed_ms = self.banked_ms, "paused");
        Some(Event::Paused {
            mode,
            elapsed_ms: self.banked_ms,
            at: Utc::now(),
        })
    }

    /// End work and start the earned break. Only valid while work is running.
    pub fn stop_work(&mut self) -> Option<Event> {
        if self.phase != TimerPhase::WorkRunning {
            return None;
        }
        let work_ms = self.elapsed_ms();
        let break_ms = break_duration_for(work_ms);
        self.total_work_ms = self.total_work_ms.saturating_add(work_ms);
        self.break_duration_ms = break_ms;
        self.banked_ms = 0;
        self.segment_start_ms = Some(self.clock.now_ms());
        self.phase = TimerPhase::BreakRunning;
        debug!(work_ms, break_ms, "work stopped, break started");
        Some(Event::WorkStopped {
            work_ms,
            break_ms,
            total_work_ms: self.total_work_ms,
            at: Utc::now(),
        })
    }

    /// Abandon the current segment. A skipped break is not a completed break.
    pub fn reset(&mut self) -> Option<Event> {
        if self.phase == TimerPhase::Standby {
            return None;
        }
        let from = self.phase;
        self.enter_standby();
        debug!(?from, "reset to standby");
        Some(Event::TimerReset {
            from,
            at: Utc::now(),
        })
    }

    /// Reset from any phase and forget the accumulated work total.
    pub fn reset_session(&mut self) -> Event {
        let from = self.phase;
        self.enter_standby();
        self.total_work_ms = 0;
        debug!(?from, "session reset");
        Event::TimerReset {
            from,
            at: Utc::now(),
        }
    }

    /// Call periodically while running. Returns `Some(Event::BreakCompleted)`
    /// on the tick that sees the break run out.
    pub fn tick(&mut self) -> Option<Event> {
        match self.phase {
            TimerPhase::BreakRunning => {
                if self.elapsed_ms() < self.break_duration_ms {
                    return None;
                }
                // The logged length is the planned break, not the overshoot.
                let break_ms = self.break_duration_ms;
                self.enter_standby();
                debug!(break_ms, "break completed");
                Some(Event::BreakCompleted {
                    break_ms,
                    at: Utc::now(),
                })
            }
            // Work counts up with no bound; elapsed is read from the clock on demand.
            _ => None,
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn enter_standby(&mut self) {
        self.phase = TimerPhase::Standby;
        self.banked_ms = 0;
        self.segment_start_ms = None;
        self.break_duration_ms = 0;
    }
}

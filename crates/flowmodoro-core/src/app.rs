//! The Flowmodoro controller.
//!
//! Owns the timer engine together with everything that reacts to it: the
//! session log, the task list, the panel flags, the tick source and the
//! notification sink. Commands and ticks both go through `&mut self`, so a
//! front end that owns one controller gets serialized access for free.
//!
//! Side effects never block a transition. A failed write or a failed
//! notification is logged and the timer carries on.

use std::time::Duration;

use tracing::{debug, warn};

use crate::error::ValidationError;
use crate::events::Event;
use crate::notify::NotificationSink;
use crate::panels::{Panel, PanelState};
use crate::session_log::{SessionLog, SessionLogEntry};
use crate::storage::KvStore;
use crate::tasks::{Task, TaskList};
use crate::timer::{Clock, Command, SystemClock, TickSource, TimerEngine, TimerSnapshot};

type Subscriber = Box<dyn FnMut(&TimerSnapshot)>;

pub struct Flowmodoro<K, T, C = SystemClock> {
    engine: TimerEngine<C>,
    store: K,
    ticker: T,
    tick_period: Duration,
    notifier: Box<dyn NotificationSink>,
    log: SessionLog,
    tasks: TaskList,
    panels: PanelState,
    subscribers: Vec<Subscriber>,
}

impl<K: KvStore, T: TickSource, C: Clock> Flowmodoro<K, T, C> {
    /// Build a controller in `Standby`, reading tasks, sessions and panel
    /// flags from `store`. Unusable stored data loads as empty.
    pub fn load(
        store: K,
        ticker: T,
        clock: C,
        notifier: Box<dyn NotificationSink>,
        tick_period: Duration,
    ) -> Self {
        let log = SessionLog::load(&store);
        let tasks = TaskList::load(&store);
        let panels = PanelState::load(&store);
        debug!(
            sessions = log.len(),
            tasks = tasks.len(),
            "loaded persisted state"
        );
        Self {
            engine: TimerEngine::new(clock),
            store,
            ticker,
            tick_period,
            notifier,
            log,
            tasks,
            panels,
            subscribers: Vec::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn engine(&self) -> &TimerEngine<C> {
        &self.engine
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        self.engine.snapshot()
    }

    pub fn session_log(&self) -> &SessionLog {
        &self.log
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn panels(&self) -> PanelState {
        self.panels
    }

    pub fn store(&self) -> &K {
        &self.store
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    pub fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Register a listener called with a fresh snapshot after every state
    /// change and every tick of a running segment.
    pub fn subscribe(&mut self, callback: impl FnMut(&TimerSnapshot) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    // ── Timer ────────────────────────────────────────────────────────

    /// Apply a timer command. Commands that do not fit the current phase are
    /// ignored and return `None`.
    pub fn dispatch(&mut self, command: Command) -> Option<Event> {
        let event = self.engine.dispatch(command)?;
        self.apply(&event);
        Some(event)
    }

    /// Deliver one tick from the tick source.
    pub fn tick(&mut self) -> Option<Event> {
        let was_running = self.engine.is_running();
        match self.engine.tick() {
            Some(event) => {
                self.apply(&event);
                Some(event)
            }
            None => {
                if was_running {
                    self.publish();
                }
                None
            }
        }
    }

    /// Return to `Standby` from anywhere and zero the total work time.
    pub fn reset_session(&mut self) -> Event {
        let event = self.engine.reset_session();
        self.apply(&event);
        event
    }

    fn apply(&mut self, event: &Event) {
        // Cancel or replace the running tick before anything else happens.
        if event.stops_clock() {
            self.ticker.disarm();
        }
        if event.starts_clock() {
            self.ticker.arm(self.tick_period);
        }

        match event {
            Event::WorkStopped { work_ms, .. } => {
                self.record(SessionLogEntry::work(*work_ms));
            }
            Event::BreakCompleted { break_ms, .. } => {
                self.record(SessionLogEntry::break_(*break_ms));
                if let Err(e) = self.notifier.notify() {
                    warn!(error = %e, "break notification failed");
                }
            }
            _ => {}
        }

        self.publish();
    }

    fn record(&mut self, entry: SessionLogEntry) {
        self.log.record(entry);
        if let Err(e) = self.log.save(&self.store) {
            warn!(error = %e, "failed to persist session log");
        }
    }

    fn publish(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = self.engine.snapshot();
        for subscriber in &mut self.subscribers {
            subscriber(&snapshot);
        }
    }

    // ── Session log ──────────────────────────────────────────────────

    pub fn clear_log(&mut self) {
        if let Err(e) = self.log.clear(&self.store) {
            warn!(error = %e, "failed to remove persisted session log");
        }
    }

    // ── Tasks ────────────────────────────────────────────────────────

    pub fn add_task(&mut self, text: &str) -> bool {
        let added = self.tasks.add(text);
        if added {
            self.save_tasks();
        }
        added
    }

    pub fn remove_task(&mut self, index: usize) -> Option<Task> {
        let removed = self.tasks.remove(index)?;
        self.save_tasks();
        Some(removed)
    }

    /// # Errors
    /// Returns an error unless `order` is a permutation of the task indices.
    pub fn reorder_tasks(&mut self, order: &[usize]) -> Result<(), ValidationError> {
        self.tasks.reorder(order)?;
        self.save_tasks();
        Ok(())
    }

    /// # Errors
    /// Returns an error if either index is out of bounds.
    pub fn move_task(&mut self, from: usize, to: usize) -> Result<(), ValidationError> {
        self.tasks.move_task(from, to)?;
        self.save_tasks();
        Ok(())
    }

    fn save_tasks(&self) {
        if let Err(e) = self.tasks.save(&self.store) {
            warn!(error = %e, "failed to persist task list");
        }
    }

    // ── Panels ───────────────────────────────────────────────────────

    /// Flip a panel's visibility and return the new value.
    pub fn toggle_panel(&mut self, panel: Panel) -> bool {
        match self.panels.toggle(panel, &self.store) {
            Ok(visible) => visible,
            Err(e) => {
                warn!(error = %e, ?panel, "failed to persist panel visibility");
                self.panels.is_visible(panel)
            }
        }
    }
}

//! Periodic tick sources.
//!
//! The engine does not schedule anything itself. Whoever drives it arms a
//! [`TickSource`] while a segment is running and calls `tick()` on every
//! delivery. Only one repeating tick may be live: a second one would apply
//! every tick twice.

use std::time::Duration;

pub const DEFAULT_TICK_MS: u64 = 250;
pub const MAX_TICK_MS: u64 = 1000;

pub trait TickSource {
    /// Start delivering ticks every `period`. Cancels any tick already armed.
    fn arm(&mut self, period: Duration);

    /// Stop delivering ticks. No-op when nothing is armed.
    fn disarm(&mut self);

    fn is_armed(&self) -> bool;
}

/// Clamp a configured tick period into `1..=1000` ms.
pub fn tick_period(ms: u64) -> Duration {
    Duration::from_millis(ms.clamp(1, MAX_TICK_MS))
}

/// Tick source that delivers nothing on its own.
///
/// Tests and one-shot callers feed ticks by hand and inspect how the
/// controller armed and cancelled it.
#[derive(Debug, Default)]
pub struct ManualTicker {
    armed: Option<Duration>,
    arm_count: usize,
    cancel_count: usize,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn period(&self) -> Option<Duration> {
        self.armed
    }

    /// Number of times a tick was armed.
    pub fn arm_count(&self) -> usize {
        self.arm_count
    }

    /// Number of times a live tick was cancelled, by `disarm` or by re-arming.
    pub fn cancel_count(&self) -> usize {
        self.cancel_count
    }
}

impl TickSource for ManualTicker {
    fn arm(&mut self, period: Duration) {
        self.disarm();
        self.armed = Some(period);
        self.arm_count += 1;
    }

    fn disarm(&mut self) {
        if self.armed.take().is_some() {
            self.cancel_count += 1;
        }
    }

    fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rearming_cancels_previous() {
        let mut ticker = ManualTicker::new();
        ticker.arm(Duration::from_millis(250));
        ticker.arm(Duration::from_millis(500));
        assert!(ticker.is_armed());
        assert_eq!(ticker.arm_count(), 2);
        assert_eq!(ticker.cancel_count(), 1);
        assert_eq!(ticker.period(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn disarm_when_idle_is_noop() {
        let mut ticker = ManualTicker::new();
        ticker.disarm();
        assert_eq!(ticker.cancel_count(), 0);
    }

    #[test]
    fn tick_period_is_clamped() {
        assert_eq!(tick_period(0), Duration::from_millis(1));
        assert_eq!(tick_period(250), Duration::from_millis(250));
        assert_eq!(tick_period(5000), Duration::from_millis(1000));
    }
}

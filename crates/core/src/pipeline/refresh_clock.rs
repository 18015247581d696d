use std::time::{Duration, Instant};

use crate::shared::constants::DEFAULT_REFRESH_HZ;

/// Paces the driver loop between ticks, standing in for a display-refresh
/// signal.
///
/// Overrunning the interval is never an error: the next tick simply starts
/// late.
pub trait RefreshClock: Send {
    fn wait_for_refresh(&mut self);
}

/// Returns immediately; ticks run back to back.
pub struct Unpaced;

impl RefreshClock for Unpaced {
    fn wait_for_refresh(&mut self) {}
}

/// Sleeps until the next fixed-interval deadline.
pub struct IntervalClock {
    interval: Duration,
    last: Option<Instant>,
    overruns: usize,
}

impl IntervalClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
            overruns: 0,
        }
    }

    /// Interval for a target rate; rates at or below zero fall back to
    /// unpaced behaviour (zero interval).
    pub fn from_hz(hz: f64) -> Self {
        let interval = if hz > 0.0 {
            Duration::from_secs_f64(1.0 / hz)
        } else {
            Duration::ZERO
        };
        Self::new(interval)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of refreshes where the previous tick ran past its budget.
    pub fn overruns(&self) -> usize {
        self.overruns
    }
}

impl Default for IntervalClock {
    fn default() -> Self {
        Self::from_hz(DEFAULT_REFRESH_HZ)
    }
}

impl RefreshClock for IntervalClock {
    fn wait_for_refresh(&mut self) {
        let now = Instant::now();
        if let Some(last) = self.last {
            let elapsed = now.duration_since(last);
            if elapsed < self.interval {
                std::thread::sleep(self.interval - elapsed);
            } else if !self.interval.is_zero() {
                self.overruns += 1;
                log::debug!(
                    "Tick overran refresh budget: {:.2}ms > {:.2}ms",
                    elapsed.as_secs_f64() * 1000.0,
                    self.interval.as_secs_f64() * 1000.0
                );
            }
        }
        self.last = Some(Instant::now());
    }
}

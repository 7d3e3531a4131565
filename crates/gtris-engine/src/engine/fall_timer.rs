use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How long a piece waits before it moves down on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallInterval {
    /// Number of ticks; each [`FallTimer::advance`] call counts as one.
    Ticks(u32),
    /// Wall-clock milliseconds, accumulated from the elapsed time of each tick.
    Millis(u64),
}

impl Default for FallInterval {
    fn default() -> Self {
        Self::Ticks(4)
    }
}

impl FallInterval {
    #[must_use]
    pub fn is_zero(self) -> bool {
        matches!(self, Self::Ticks(0) | Self::Millis(0))
    }
}

/// Fall-timer accumulator.
///
/// The timer fires once the accumulated amount strictly exceeds the interval,
/// then starts over from zero. With `Ticks(4)` a piece drops on every fifth tick.
#[derive(Debug, Clone)]
pub struct FallTimer {
    interval: FallInterval,
    ticks: u32,
    elapsed: Duration,
}

impl FallTimer {
    #[must_use]
    pub const fn new(interval: FallInterval) -> Self {
        Self {
            interval,
            ticks: 0,
            elapsed: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn interval(&self) -> FallInterval {
        self.interval
    }

    /// Advances the timer by one tick of length `elapsed`.
    ///
    /// Returns `true` when the interval has been exceeded; the timer is reset
    /// in that case.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        let fired = match self.interval {
            FallInterval::Ticks(ticks) => {
                self.ticks = self.ticks.saturating_add(1);
                self.ticks > ticks
            }
            FallInterval::Millis(millis) => {
                self.elapsed = self.elapsed.saturating_add(elapsed);
                self.elapsed > Duration::from_millis(millis)
            }
        };
        if fired {
            self.reset();
        }
        fired
    }

    pub fn reset(&mut self) {
        self.ticks = 0;
        self.elapsed = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_interval_fires_after_interval_is_exceeded() {
        let mut timer = FallTimer::new(FallInterval::Ticks(4));
        let fired: Vec<_> = (0..10).map(|_| timer.advance(Duration::ZERO)).collect();
        assert_eq!(
            fired,
            [false, false, false, false, true, false, false, false, false, true]
        );
    }

    #[test]
    fn test_tick_interval_ignores_elapsed_time() {
        let mut timer = FallTimer::new(FallInterval::Ticks(1));
        assert!(!timer.advance(Duration::from_secs(60)));
        assert!(timer.advance(Duration::ZERO));
    }

    #[test]
    fn test_millis_interval_accumulates_elapsed_time() {
        let mut timer = FallTimer::new(FallInterval::Millis(100));
        assert!(!timer.advance(Duration::from_millis(60)));
        assert!(!timer.advance(Duration::from_millis(40)));
        assert!(timer.advance(Duration::from_millis(1)));
        // Reset after firing, the surplus is not carried over.
        assert!(!timer.advance(Duration::from_millis(100)));
    }

    #[test]
    fn test_reset_discards_progress() {
        let mut timer = FallTimer::new(FallInterval::Ticks(2));
        timer.advance(Duration::ZERO);
        timer.advance(Duration::ZERO);
        timer.reset();
        assert!(!timer.advance(Duration::ZERO));
        assert!(!timer.advance(Duration::ZERO));
        assert!(timer.advance(Duration::ZERO));
    }

    #[test]
    fn test_interval_serde_format() {
        let json = serde_json::to_string(&FallInterval::Ticks(4)).unwrap();
        assert_eq!(json, r#"{"ticks":4}"#);
        let interval: FallInterval = serde_json::from_str(r#"{"millis":250}"#).unwrap();
        assert_eq!(interval, FallInterval::Millis(250));
    }
}

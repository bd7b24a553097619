//! Cancellable one-shot countdowns owned by states.
//!
//! States that need "wait N seconds, then act" arm a [`Timer`] in `on_enter`,
//! advance it from `on_update`/`on_fixed_update` with the frame delta they
//! receive from their controller, and cancel it in `on_exit`. The machine is
//! unaware of timers.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A one-shot countdown that fires exactly once per arming.
///
/// # Example
///
/// ```rust
/// use harrow::core::Timer;
/// use std::time::Duration;
///
/// let mut timer = Timer::new();
/// timer.arm(Duration::from_millis(100));
///
/// assert!(!timer.tick(Duration::from_millis(60)));
/// assert!(timer.tick(Duration::from_millis(60)));
/// assert!(!timer.tick(Duration::from_millis(60)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    remaining: Option<Duration>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the countdown.
    pub fn arm(&mut self, after: Duration) {
        self.remaining = Some(after);
    }

    /// Stop the countdown without firing.
    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn remaining(&self) -> Option<Duration> {
        self.remaining
    }

    /// Advance by `dt`. Returns `true` on the tick the countdown reaches zero,
    /// after which the timer is disarmed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(remaining) = self.remaining else {
            return false;
        };
        match remaining.checked_sub(dt) {
            Some(left) if !left.is_zero() => {
                self.remaining = Some(left);
                false
            }
            _ => {
                self.remaining = None;
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unarmed_timer_never_fires() {
        let mut timer = Timer::new();
        assert!(!timer.tick(Duration::from_secs(10)));
        assert!(!timer.is_armed());
    }

    #[test]
    fn fires_once_when_reaching_zero() {
        let mut timer = Timer::new();
        timer.arm(Duration::from_millis(30));

        assert!(!timer.tick(Duration::from_millis(10)));
        assert_eq!(timer.remaining(), Some(Duration::from_millis(20)));
        assert!(!timer.tick(Duration::from_millis(10)));
        assert!(timer.tick(Duration::from_millis(10)));
        assert!(!timer.is_armed());
        assert!(!timer.tick(Duration::from_millis(10)));
    }

    #[test]
    fn overshoot_still_fires() {
        let mut timer = Timer::new();
        timer.arm(Duration::from_millis(5));

        assert!(timer.tick(Duration::from_secs(1)));
    }

    #[test]
    fn cancel_prevents_firing() {
        let mut timer = Timer::new();
        timer.arm(Duration::from_millis(5));
        timer.cancel();

        assert!(!timer.tick(Duration::from_secs(1)));
    }

    #[test]
    fn rearming_restarts_countdown() {
        let mut timer = Timer::new();
        timer.arm(Duration::from_millis(20));
        timer.tick(Duration::from_millis(15));
        timer.arm(Duration::from_millis(20));

        assert!(!timer.tick(Duration::from_millis(15)));
        assert!(timer.tick(Duration::from_millis(5)));
    }
}

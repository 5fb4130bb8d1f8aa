//! Non-blocking periodic trigger.
//!
//! Answers "have at least N milliseconds passed since the last fire" without
//! ever waiting. Each trigger owns its own timestamp, so any number of them
//! can run side by side inside one control loop.

use embassy_time::{Duration, Instant};

/// Periodic trigger with a fixed firing grid
///
/// The first observation arms the trigger at `now`. After that the fire
/// timestamp only ever moves along its interval grid, so firing does not
/// drift with irregular tick timing. When several intervals were missed each
/// call fires once more until the timestamp caught up, so callers that must
/// stay idempotent for a repeated `now` remember the `now` they last stepped
/// at.
#[derive(Debug, Clone, Copy)]
pub struct PeriodicTrigger {
    interval: Duration,
    last_fire: Option<Instant>,
}

impl PeriodicTrigger {
    /// Create a disarmed trigger
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fire: None,
        }
    }

    /// Create a trigger armed at `now`
    pub const fn armed(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_fire: Some(now),
        }
    }

    /// Get the firing interval
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the firing interval, keeping the last fire timestamp
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Timestamp of the last fire (or arming), if armed
    pub const fn last_fire(&self) -> Option<Instant> {
        self.last_fire
    }

    /// Forget the last fire timestamp; the next call re-arms
    pub fn disarm(&mut self) {
        self.last_fire = None;
    }

    /// Returns `true` if at least one interval elapsed since the last fire
    pub fn try_fire(&mut self, now: Instant) -> bool {
        let Some(last) = self.last_fire.as_mut() else {
            self.last_fire = Some(now);
            return false;
        };
        try_fire(self.interval, last, now).is_some()
    }
}

/// Stateless form of [`PeriodicTrigger::try_fire`]
///
/// Advances `last_fire` by exactly one interval when it elapsed and returns
/// the new timestamp. A caller that fell behind catches up one interval per
/// call. A zero interval fires on every call and snaps to `now`.
pub fn try_fire(interval: Duration, last_fire: &mut Instant, now: Instant) -> Option<Instant> {
    let elapsed = now.checked_duration_since(*last_fire)?;
    if interval.as_millis() == 0 {
        *last_fire = now;
        return Some(now);
    }
    if elapsed < interval {
        return None;
    }
    *last_fire += interval;
    Some(*last_fire)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stateless_fire_advances_by_one_interval() {
        let mut last = Instant::from_millis(100);
        let fired = try_fire(Duration::from_millis(20), &mut last, Instant::from_millis(125));
        assert_eq!(fired, Some(Instant::from_millis(120)));
        assert_eq!(last, Instant::from_millis(120));
    }

    #[test]
    fn stateless_fire_catches_up_one_interval_per_call() {
        let mut last = Instant::from_millis(0);
        let now = Instant::from_millis(45);
        assert_eq!(try_fire(Duration::from_millis(20), &mut last, now), Some(Instant::from_millis(20)));
        assert_eq!(try_fire(Duration::from_millis(20), &mut last, now), Some(Instant::from_millis(40)));
        assert_eq!(try_fire(Duration::from_millis(20), &mut last, now), None);
        assert_eq!(last, Instant::from_millis(40));
    }

    #[test]
    fn time_going_backwards_never_fires() {
        let mut last = Instant::from_millis(100);
        assert!(try_fire(Duration::from_millis(20), &mut last, Instant::from_millis(50)).is_none());
        assert_eq!(last, Instant::from_millis(100));
    }
}

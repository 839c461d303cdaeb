//! Release debouncing for noisy press/release sources.
//!
//! Some operating systems deliver a repeating press/release pair while a key
//! is physically held instead of a single press followed by a single release.
//! The debouncer records the timestamp of every press; a release only counts
//! as genuine if no newer press for the same direction arrives within the
//! grace window. The timestamp comparison happens at grace-check fire time,
//! not at schedule time, so intervening presses are always observed.

use crate::direction::Direction;
use tokio::time::Instant;

/// What the worker should do with a release event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// No press was ever recorded for this direction (programmatic release);
    /// apply the release immediately and unconditionally.
    Immediate,
    /// Defer for the grace window, then re-check against `pressed_at`.
    Deferred { pressed_at: Instant },
}

/// Per-direction last-press timestamp table.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyDebouncer {
    last_press: [Option<Instant>; 4],
}

impl KeyDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press. Called on every press, including repeats while held.
    pub fn note_press(&mut self, direction: Direction, now: Instant) {
        self.last_press[direction.index()] = Some(now);
    }

    /// Decide how a release should be handled, capturing the timestamp that a
    /// deferred check must later compare against.
    pub fn release_outcome(&self, direction: Direction) -> ReleaseOutcome {
        match self.last_press[direction.index()] {
            Some(pressed_at) => ReleaseOutcome::Deferred { pressed_at },
            None => ReleaseOutcome::Immediate,
        }
    }

    /// True iff no press for `direction` arrived after `pressed_at`. Called
    /// when the grace window elapses; a changed timestamp means the release
    /// was a duplicate emitted mid-hold and must be discarded.
    pub fn is_genuine(&self, direction: Direction, pressed_at: Instant) -> bool {
        self.last_press[direction.index()] == Some(pressed_at)
    }

    /// Drop all recorded timestamps. Used on mode transitions.
    pub fn clear(&mut self) {
        self.last_press = [None; 4];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn release_without_recorded_press_is_immediate() {
        let debouncer = KeyDebouncer::new();
        assert_eq!(
            debouncer.release_outcome(Direction::Up),
            ReleaseOutcome::Immediate
        );
    }

    #[test]
    fn release_after_press_defers_with_captured_timestamp() {
        let mut debouncer = KeyDebouncer::new();
        let t0 = Instant::now();
        debouncer.note_press(Direction::Left, t0);

        match debouncer.release_outcome(Direction::Left) {
            ReleaseOutcome::Deferred { pressed_at } => assert_eq!(pressed_at, t0),
            other => panic!("expected deferred outcome, got {other:?}"),
        }
    }

    #[test]
    fn unchanged_timestamp_is_genuine() {
        let mut debouncer = KeyDebouncer::new();
        let t0 = Instant::now();
        debouncer.note_press(Direction::Down, t0);

        assert!(debouncer.is_genuine(Direction::Down, t0));
    }

    #[test]
    fn intervening_press_marks_release_spurious() {
        let mut debouncer = KeyDebouncer::new();
        let t0 = Instant::now();
        debouncer.note_press(Direction::Down, t0);

        // A repeat press lands during the grace window.
        let t1 = t0 + Duration::from_millis(70);
        debouncer.note_press(Direction::Down, t1);

        assert!(!debouncer.is_genuine(Direction::Down, t0));
        assert!(debouncer.is_genuine(Direction::Down, t1));
    }

    #[test]
    fn directions_are_tracked_independently() {
        let mut debouncer = KeyDebouncer::new();
        let t0 = Instant::now();
        debouncer.note_press(Direction::Up, t0);
        debouncer.note_press(Direction::Right, t0 + Duration::from_millis(5));

        assert!(debouncer.is_genuine(Direction::Up, t0));
        assert_eq!(
            debouncer.release_outcome(Direction::Left),
            ReleaseOutcome::Immediate
        );
    }

    #[test]
    fn clear_forgets_all_presses() {
        let mut debouncer = KeyDebouncer::new();
        debouncer.note_press(Direction::Up, Instant::now());
        debouncer.clear();

        assert_eq!(
            debouncer.release_outcome(Direction::Up),
            ReleaseOutcome::Immediate
        );
    }
}

//! Continuous-motion state: which directions are held and which tick chain
//! is current for each.
//!
//! While a direction is held the worker re-asserts the pan command at a fixed
//! cadence through a self-rescheduling tick. Each press starts a fresh tick
//! chain identified by a per-direction generation counter; a tick whose
//! generation no longer matches is stale (the direction was released and
//! possibly re-pressed since it was scheduled) and must neither emit nor
//! reschedule. This keeps at most one live chain per direction without any
//! explicit cancellation primitive.

use crate::direction::{Direction, DirectionSet};

/// Result of a press: whether a new tick chain must be started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Direction newly held; start motion and schedule ticks with this generation.
    Engaged { generation: u64 },
    /// Already held; the existing chain keeps running.
    AlreadyHeld,
}

/// Result of a cadence tick arriving at the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Re-assert the pan command and reschedule the next tick.
    Reassert,
    /// Chain superseded or direction released; do nothing.
    Expired,
}

/// Result of removing a direction from the held set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseEffect {
    /// Direction removed and others remain held.
    Removed,
    /// Direction removed and the set is now empty; emit exactly one stop.
    AllStopped,
    /// Direction was not held; nothing to do.
    NotHeld,
}

/// Held-direction set plus the generation table for tick chains.
#[derive(Debug, Clone, Copy, Default)]
pub struct MotionDriver {
    held: DirectionSet,
    generations: [u64; 4],
}

impl MotionDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a press. A newly held direction bumps its generation,
    /// invalidating any tick still in flight from an earlier hold.
    pub fn press(&mut self, direction: Direction) -> PressOutcome {
        if self.held.insert(direction) {
            let slot = &mut self.generations[direction.index()];
            *slot = slot.wrapping_add(1);
            PressOutcome::Engaged { generation: *slot }
        } else {
            PressOutcome::AlreadyHeld
        }
    }

    /// Check whether a tick scheduled under `generation` is still current.
    pub fn tick(&self, direction: Direction, generation: u64) -> TickOutcome {
        if self.held.contains(direction) && self.generations[direction.index()] == generation {
            TickOutcome::Reassert
        } else {
            TickOutcome::Expired
        }
    }

    /// Apply a confirmed genuine release. The stop decision strictly follows
    /// the removal that emptied the set.
    pub fn release(&mut self, direction: Direction) -> ReleaseEffect {
        if !self.held.remove(direction) {
            return ReleaseEffect::NotHeld;
        }
        if self.held.is_empty() {
            ReleaseEffect::AllStopped
        } else {
            ReleaseEffect::Removed
        }
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        self.held.contains(direction)
    }

    pub fn is_idle(&self) -> bool {
        self.held.is_empty()
    }

    pub fn held(&self) -> DirectionSet {
        self.held
    }

    /// Drop every held direction, returning what was held. Used by the mode
    /// arbiter's bulk force-release.
    pub fn clear(&mut self) -> DirectionSet {
        let was_held = self.held;
        self.held.clear();
        was_held
    }
}

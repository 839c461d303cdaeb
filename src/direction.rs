//! Pan directions and the small fixed-size set tracking which are held.

/// A pan direction the operator can command.
///
/// Each direction maps to a unit polar delta: azimuth for left/right,
/// altitude for up/down. Left pans azimuth positive, right negative,
/// matching the arm's polar convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in a stable order usable as table indices.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit (azimuth, altitude) delta implied by this direction.
    pub fn pan_delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (1, 0),
            Direction::Right => (-1, 0),
        }
    }

    /// Slot index into the per-direction tables (held set, timestamps, generations).
    pub(crate) fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    /// Lowercase label used for logging and the status line.
    pub fn label(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Fixed four-slot set of directions.
///
/// Backs the held-direction state of the motion driver. A direction is a
/// member iff a start command has been issued for it and no genuine release
/// has yet been confirmed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionSet([bool; 4]);

impl DirectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a direction; returns true if it was not already present.
    pub fn insert(&mut self, direction: Direction) -> bool {
        let slot = &mut self.0[direction.index()];
        let newly = !*slot;
        *slot = true;
        newly
    }

    /// Remove a direction; returns true if it was present.
    pub fn remove(&mut self, direction: Direction) -> bool {
        let slot = &mut self.0[direction.index()];
        let was = *slot;
        *slot = false;
        was
    }

    pub fn contains(&self, direction: Direction) -> bool {
        self.0[direction.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|held| !held)
    }

    pub fn clear(&mut self) {
        self.0 = [false; 4];
    }

    /// Iterate over the directions currently in the set.
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL
            .iter()
            .copied()
            .filter(move |d| self.contains(*d))
    }

    pub fn len(&self) -> usize {
        self.0.iter().filter(|held| **held).count()
    }
}

//! Protocol definitions shared between the input surfaces, the timer tasks,
//! and the control worker.
//!
//! All mutable control state lives inside the worker; deferred work re-enters
//! through `ControlCommand` so nothing else ever touches the held set or the
//! press timestamps.

use crate::control::mode::Mode;
use crate::direction::Direction;
use tokio::time::Instant;

/// Commands consumed by the control worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    /// Raw press from a button or key. Repeats while held are expected.
    Press(Direction),
    /// Raw release from a button or key. May be spurious mid-hold noise.
    Release(Direction),
    /// Deferred debounce check, sent by a timer task after the grace window.
    /// `pressed_at` is the press timestamp captured when the release arrived.
    ReleaseCheck {
        direction: Direction,
        pressed_at: Instant,
    },
    /// Cadence tick for a held direction. Stale generations are discarded.
    MotionTick {
        direction: Direction,
        generation: u64,
    },
    /// Flip between manual and automatic control.
    ToggleMode,
    /// One-shot move to the home position.
    Home,
    /// Stop motion if needed and exit the worker.
    Shutdown,
}

/// Events emitted by the worker for the console display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// A direction became held; its indicator should depress.
    DirectionEngaged(Direction),
    /// A genuine release was confirmed; its indicator should raise.
    DirectionReleased(Direction),
    /// The last held direction released and a stop was sent.
    MotionStopped,
    /// The mode label changed.
    ModeChanged(Mode),
    /// A home command was sent to the arm.
    HomeCommanded,
}

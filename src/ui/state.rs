//! View state for the console display.

use crate::control::mode::Mode;
use crate::control::protocol::ControlEvent;
use crate::direction::{Direction, DirectionSet};

/// Everything the renderer needs to draw one frame of the console.
#[derive(Debug, Clone)]
pub struct ConsoleState {
    pub mode: Mode,
    /// Directions currently shown depressed.
    pub engaged: DirectionSet,
    /// Transient status line ("moving home", "pan stopped", ...).
    pub message: Option<String>,
}

impl Default for ConsoleState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleState {
    pub fn new() -> Self {
        Self {
            mode: Mode::Manual,
            engaged: DirectionSet::new(),
            message: None,
        }
    }

    /// Fold a worker event into the display state.
    pub fn apply(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::DirectionEngaged(direction) => {
                self.engaged.insert(direction);
                self.message = Some(format!("moving {}", direction.label()));
            }
            ControlEvent::DirectionReleased(direction) => {
                self.engaged.remove(direction);
            }
            ControlEvent::MotionStopped => {
                self.message = Some("stopped".to_string());
            }
            ControlEvent::ModeChanged(mode) => {
                self.mode = mode;
                self.engaged.clear();
                self.message = None;
            }
            ControlEvent::HomeCommanded => {
                self.message = Some("moving home".to_string());
            }
        }
    }

    pub fn is_engaged(&self, direction: Direction) -> bool {
        self.engaged.contains(direction)
    }
}

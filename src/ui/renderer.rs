//! Console renderer trait and lifecycle hooks.

use crate::error::Result;
use crate::ui::state::ConsoleState;

/// Core trait for rendering the console and managing terminal lifecycle.
pub trait ConsoleRenderer {
    /// Set up the terminal (raw mode, alternate screen, key release reporting).
    fn initialize(&mut self) -> Result<()>;

    /// Draw the current console state.
    fn render(&mut self, state: &ConsoleState) -> Result<()>;

    /// Restore the terminal.
    fn cleanup(&mut self) -> Result<()>;
}

//! Console display module with ratatui.
//!
//! A thin terminal stand-in for the original operator panel: arrow pad with
//! depressed/raised indicators, mode label, status line.

pub mod renderer;
pub mod state;
pub mod terminal;

pub use renderer::ConsoleRenderer;
pub use state::ConsoleState;
pub use terminal::TerminalConsole;

#[cfg(test)]
pub use renderer::tests::MockRenderer;

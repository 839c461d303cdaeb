//! Terminal console implementation using ratatui.
//!
//! Draws the arrow pad, the mode label, and a status line. Key release
//! reporting is requested via the kitty keyboard enhancement flags; without
//! it most terminals never deliver release events for held arrows.

use crate::direction::Direction;
use crate::error::Result;
use crate::ui::renderer::ConsoleRenderer;
use crate::ui::state::ConsoleState;
use ratatui::crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Terminal,
};
use std::io::{self, Stdout};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

const UP_ARROW: &str = "\u{2191}";
const DOWN_ARROW: &str = "\u{2193}";
const LEFT_ARROW: &str = "\u{2190}";
const RIGHT_ARROW: &str = "\u{2192}";

/// Ratatui console for the Talos arm.
pub struct TerminalConsole {
    terminal: Option<CrosstermTerminal>,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self { terminal: None }
    }

    fn arrow_span(state: &ConsoleState, direction: Direction, glyph: &'static str) -> Span<'static> {
        if state.is_engaged(direction) {
            Span::styled(glyph, Style::default().add_modifier(Modifier::REVERSED))
        } else {
            Span::raw(glyph)
        }
    }

    fn pad_lines(state: &ConsoleState) -> Vec<Line<'static>> {
        vec![
            Line::from(vec![
                Span::raw("   "),
                Self::arrow_span(state, Direction::Up, UP_ARROW),
            ]),
            Line::from(vec![
                Span::raw(" "),
                Self::arrow_span(state, Direction::Left, LEFT_ARROW),
                Span::raw("   "),
                Self::arrow_span(state, Direction::Right, RIGHT_ARROW),
            ]),
            Line::from(vec![
                Span::raw("   "),
                Self::arrow_span(state, Direction::Down, DOWN_ARROW),
            ]),
        ]
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleRenderer for TerminalConsole {
    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            EnterAlternateScreen,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        self.terminal = Some(terminal);

        Ok(())
    }

    fn render(&mut self, state: &ConsoleState) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            terminal.draw(|frame| {
                let chunks = Layout::default()
                    .direction(LayoutDirection::Vertical)
                    .constraints(
                        [
                            Constraint::Length(1), // title
                            Constraint::Length(3), // arrow pad
                            Constraint::Length(1), // mode label
                            Constraint::Length(1), // status
                            Constraint::Min(0),    // help
                        ]
                        .as_ref(),
                    )
                    .split(frame.size());

                let title = Paragraph::new("Talos Manual Interface").alignment(Alignment::Center);
                frame.render_widget(title, chunks[0]);

                let pad = Paragraph::new(Self::pad_lines(state)).alignment(Alignment::Center);
                frame.render_widget(pad, chunks[1]);

                let mode = Paragraph::new(format!("Mode: {}", state.mode.label()))
                    .alignment(Alignment::Center);
                frame.render_widget(mode, chunks[2]);

                let status = Paragraph::new(state.message.clone().unwrap_or_default())
                    .alignment(Alignment::Center);
                frame.render_widget(status, chunks[3]);

                let help = Paragraph::new("arrows pan | h home | m toggle mode | q quit")
                    .alignment(Alignment::Center)
                    .style(Style::default().add_modifier(Modifier::DIM));
                frame.render_widget(help, chunks[4]);
            })?;
        }
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            disable_raw_mode()?;
            execute!(
                io::stdout(),
                PopKeyboardEnhancementFlags,
                LeaveAlternateScreen
            )?;
            self.terminal = None;
        }
        Ok(())
    }
}

impl Drop for TerminalConsole {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

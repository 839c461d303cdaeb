//! Keyboard input surface.
//!
//! Translates crossterm key events into control commands on a blocking poll
//! thread. Key repeats count as presses; that repeating press/release stream
//! is exactly what the debouncer downstream is built to absorb.
//!
//! Manual affordances are additionally gated here with a shared flag the
//! console loop maintains, so automatic mode disables input at the surface
//! as well as inside the worker.

use crate::control::protocol::ControlCommand;
use crate::direction::Direction;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::Sender;

/// Translates raw key events into `ControlCommand`s.
pub struct InputMapper {
    manual_enabled: Arc<AtomicBool>,
}

impl InputMapper {
    pub fn new(manual_enabled: Arc<AtomicBool>) -> Self {
        Self { manual_enabled }
    }

    /// Map one key event to a command, honoring the manual-input gate.
    pub fn map_key_event(&self, key_event: KeyEvent) -> Option<ControlCommand> {
        // Mode toggling and quitting stay available in every mode.
        if key_event.kind == KeyEventKind::Press {
            match (key_event.code, key_event.modifiers) {
                (KeyCode::Char('m'), _) | (KeyCode::Tab, _) => {
                    return Some(ControlCommand::ToggleMode);
                }
                (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                    return Some(ControlCommand::Shutdown);
                }
                _ => {}
            }
        }

        if !self.manual_enabled.load(Ordering::SeqCst) {
            return None;
        }

        match key_event.kind {
            // Repeats are deliberate presses: they re-arm the debounce timestamp.
            KeyEventKind::Press | KeyEventKind::Repeat => match key_event.code {
                KeyCode::Up => Some(ControlCommand::Press(Direction::Up)),
                KeyCode::Down => Some(ControlCommand::Press(Direction::Down)),
                KeyCode::Left => Some(ControlCommand::Press(Direction::Left)),
                KeyCode::Right => Some(ControlCommand::Press(Direction::Right)),
                KeyCode::Char('h') | KeyCode::Home => Some(ControlCommand::Home),
                _ => None,
            },
            KeyEventKind::Release => match key_event.code {
                KeyCode::Up => Some(ControlCommand::Release(Direction::Up)),
                KeyCode::Down => Some(ControlCommand::Release(Direction::Down)),
                KeyCode::Left => Some(ControlCommand::Release(Direction::Left)),
                KeyCode::Right => Some(ControlCommand::Release(Direction::Right)),
                _ => None,
            },
        }
    }

    fn map_event(&self, event: Event) -> Option<ControlCommand> {
        match event {
            Event::Key(key_event) => self.map_key_event(key_event),
            _ => None,
        }
    }
}

/// Spawn a blocking thread that polls the terminal for key events and forwards
/// commands to the control worker.
pub fn spawn_input_thread(
    tx: Sender<ControlCommand>,
    shutdown: Arc<AtomicBool>,
    manual_enabled: Arc<AtomicBool>,
    poll_interval: Duration,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mapper = InputMapper::new(manual_enabled);
        while !shutdown.load(Ordering::SeqCst) {
            match event::poll(poll_interval) {
                Ok(true) => {
                    let event = match event::read() {
                        Ok(event) => event,
                        Err(err) => {
                            log::error!("input read error: {err}");
                            break;
                        }
                    };
                    if let Some(command) = mapper.map_event(event) {
                        if tx.blocking_send(command).is_err() {
                            break;
                        }
                    }
                }
                Ok(false) => {
                    // No input this tick; continue polling.
                    continue;
                }
                Err(err) => {
                    log::error!("input poll error: {err}");
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper(enabled: bool) -> InputMapper {
        InputMapper::new(Arc::new(AtomicBool::new(enabled)))
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn release(code: KeyCode) -> KeyEvent {
        let mut event = KeyEvent::new(code, KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        event
    }

    fn repeat(code: KeyCode) -> KeyEvent {
        let mut event = KeyEvent::new(code, KeyModifiers::NONE);
        event.kind = KeyEventKind::Repeat;
        event
    }

    #[test]
    fn arrows_map_to_press_and_release() {
        let mapper = mapper(true);
        assert_eq!(
            mapper.map_key_event(press(KeyCode::Up)),
            Some(ControlCommand::Press(Direction::Up))
        );
        assert_eq!(
            mapper.map_key_event(release(KeyCode::Up)),
            Some(ControlCommand::Release(Direction::Up))
        );
        assert_eq!(
            mapper.map_key_event(press(KeyCode::Right)),
            Some(ControlCommand::Press(Direction::Right))
        );
    }

    #[test]
    fn key_repeat_counts_as_press() {
        let mapper = mapper(true);
        assert_eq!(
            mapper.map_key_event(repeat(KeyCode::Left)),
            Some(ControlCommand::Press(Direction::Left))
        );
    }

    #[test]
    fn home_and_toggle_and_quit_bindings() {
        let mapper = mapper(true);
        assert_eq!(
            mapper.map_key_event(press(KeyCode::Char('h'))),
            Some(ControlCommand::Home)
        );
        assert_eq!(
            mapper.map_key_event(press(KeyCode::Char('m'))),
            Some(ControlCommand::ToggleMode)
        );
        assert_eq!(
            mapper.map_key_event(press(KeyCode::Char('q'))),
            Some(ControlCommand::Shutdown)
        );
        assert_eq!(
            mapper.map_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(ControlCommand::Shutdown)
        );
    }

    #[test]
    fn automatic_mode_gates_manual_commands_only() {
        let mapper = mapper(false);
        assert_eq!(mapper.map_key_event(press(KeyCode::Up)), None);
        assert_eq!(mapper.map_key_event(release(KeyCode::Up)), None);
        assert_eq!(mapper.map_key_event(press(KeyCode::Char('h'))), None);

        // Toggling back and quitting must survive the gate.
        assert_eq!(
            mapper.map_key_event(press(KeyCode::Char('m'))),
            Some(ControlCommand::ToggleMode)
        );
        assert_eq!(
            mapper.map_key_event(press(KeyCode::Char('q'))),
            Some(ControlCommand::Shutdown)
        );
    }

    #[test]
    fn unbound_keys_are_ignored() {
        let mapper = mapper(true);
        assert_eq!(mapper.map_key_event(press(KeyCode::Char('x'))), None);
        assert_eq!(mapper.map_key_event(release(KeyCode::Char('x'))), None);
    }
}

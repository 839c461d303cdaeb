//! Application orchestration layer.
//!
//! Wires the input thread, the control worker, the optional auto-tracking
//! task, and the console renderer together, then runs the event-driven render
//! loop until the worker shuts down.

use crate::config::ControlConfig;
use crate::control::mode::Mode;
use crate::control::protocol::ControlEvent;
use crate::control::worker::control_worker_loop;
use crate::error::Result;
use crate::input::service::spawn_input_thread;
use crate::motion::sink::MotionSink;
use crate::tracking::{run_auto_tracking, Tracker};
use crate::ui::renderer::ConsoleRenderer;
use crate::ui::state::ConsoleState;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};

/// How long the input thread blocks waiting for a terminal event per tick.
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);
/// Capacity of the worker command and event channels.
const CHANNEL_CAPACITY: usize = 64;

/// Application orchestrator - owns the collaborators, not the control state.
pub struct Application {
    renderer: Box<dyn ConsoleRenderer>,
    sink: Arc<dyn MotionSink>,
    tracker: Option<Box<dyn Tracker>>,
    config: ControlConfig,
}

impl Application {
    pub fn new(
        renderer: Box<dyn ConsoleRenderer>,
        sink: Arc<dyn MotionSink>,
        config: ControlConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            renderer,
            sink,
            tracker: None,
            config,
        })
    }

    /// Attach a vision tracker for automatic mode.
    pub fn with_tracker(mut self, tracker: Box<dyn Tracker>) -> Self {
        self.tracker = Some(tracker);
        self
    }

    /// Run the console until the operator quits.
    pub async fn run(&mut self) -> Result<()> {
        let (cmd_tx, cmd_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (event_tx, mut event_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (mode_tx, mode_rx) = watch::channel(Mode::Manual);

        let worker = tokio::spawn(control_worker_loop(
            cmd_rx,
            cmd_tx.clone(),
            event_tx,
            Arc::clone(&self.sink),
            self.config.clone(),
        ));

        let shutdown = Arc::new(AtomicBool::new(false));
        let manual_enabled = Arc::new(AtomicBool::new(true));
        let input_thread = spawn_input_thread(
            cmd_tx.clone(),
            Arc::clone(&shutdown),
            Arc::clone(&manual_enabled),
            INPUT_POLL_INTERVAL,
        );

        let tracking_task = self.tracker.take().map(|tracker| {
            tokio::spawn(run_auto_tracking(
                tracker,
                Arc::clone(&self.sink),
                mode_rx,
                self.config.frame_interval,
            ))
        });

        self.renderer.initialize()?;
        let mut state = ConsoleState::new();
        self.renderer.render(&state)?;

        // The worker drops its event sender on shutdown, ending this loop.
        while let Some(event) = event_rx.recv().await {
            Self::apply_event(event, &mut state, &manual_enabled, &mode_tx);
            self.renderer.render(&state)?;
        }

        shutdown.store(true, Ordering::SeqCst);
        self.renderer.cleanup()?;
        drop(mode_tx);
        if let Some(task) = tracking_task {
            task.abort();
            let _ = task.await;
        }
        let _ = worker.await;
        let _ = input_thread.join();
        Ok(())
    }

    /// Fold a worker event into display state and the input/tracking gates.
    fn apply_event(
        event: ControlEvent,
        state: &mut ConsoleState,
        manual_enabled: &AtomicBool,
        mode_tx: &watch::Sender<Mode>,
    ) {
        if let ControlEvent::ModeChanged(mode) = event {
            manual_enabled.store(mode == Mode::Manual, Ordering::SeqCst);
            let _ = mode_tx.send(mode);
        }
        state.apply(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction;

    #[test]
    fn mode_change_updates_gates_and_state() {
        let mut state = ConsoleState::new();
        let manual_enabled = AtomicBool::new(true);
        let (mode_tx, mode_rx) = watch::channel(Mode::Manual);

        Application::apply_event(
            ControlEvent::ModeChanged(Mode::Automatic),
            &mut state,
            &manual_enabled,
            &mode_tx,
        );

        assert!(!manual_enabled.load(Ordering::SeqCst));
        assert_eq!(*mode_rx.borrow(), Mode::Automatic);
        assert_eq!(state.mode, Mode::Automatic);

        Application::apply_event(
            ControlEvent::ModeChanged(Mode::Manual),
            &mut state,
            &manual_enabled,
            &mode_tx,
        );
        assert!(manual_enabled.load(Ordering::SeqCst));
    }

    #[test]
    fn direction_events_only_touch_display_state() {
        let mut state = ConsoleState::new();
        let manual_enabled = AtomicBool::new(true);
        let (mode_tx, _mode_rx) = watch::channel(Mode::Manual);

        Application::apply_event(
            ControlEvent::DirectionEngaged(Direction::Left),
            &mut state,
            &manual_enabled,
            &mode_tx,
        );

        assert!(state.is_engaged(Direction::Left));
        assert!(manual_enabled.load(Ordering::SeqCst));
    }
}

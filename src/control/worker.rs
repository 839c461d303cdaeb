//! The control worker: single owner of all arbiter state.
//!
//! Consumes `ControlCommand`s from the input surfaces and from its own timer
//! tasks, drives the `MotionSink`, and reports `ControlEvent`s to the console
//! loop. Debounce grace checks and motion cadence ticks are spawned as sleep
//! tasks that marshal back through the command channel, so the held set, the
//! press timestamps, and the mode flag are only ever touched on this task.

use crate::config::ControlConfig;
use crate::control::mode::{ModeArbiter, ModeTransition};
use crate::control::protocol::{ControlCommand, ControlEvent};
use crate::direction::Direction;
use crate::input::debounce::{KeyDebouncer, ReleaseOutcome};
use crate::motion::driver::{MotionDriver, PressOutcome, ReleaseEffect, TickOutcome};
use crate::motion::sink::MotionSink;
use std::sync::Arc;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::time::{sleep, Instant};

/// Run the control worker until a `Shutdown` command arrives.
///
/// `self_tx` must be a sender for the same channel `rx` receives from; timer
/// tasks use it to re-enter the worker.
pub async fn control_worker_loop(
    mut rx: Receiver<ControlCommand>,
    self_tx: Sender<ControlCommand>,
    events: Sender<ControlEvent>,
    sink: Arc<dyn MotionSink>,
    config: ControlConfig,
) {
    let mut state = WorkerState::new(self_tx, events, sink, config);

    while let Some(cmd) = rx.recv().await {
        if state.handle_command(cmd).await {
            break;
        }
    }
}

struct WorkerState {
    arbiter: ModeArbiter,
    debouncer: KeyDebouncer,
    driver: MotionDriver,
    self_tx: Sender<ControlCommand>,
    events: Sender<ControlEvent>,
    sink: Arc<dyn MotionSink>,
    config: ControlConfig,
}

impl WorkerState {
    fn new(
        self_tx: Sender<ControlCommand>,
        events: Sender<ControlEvent>,
        sink: Arc<dyn MotionSink>,
        config: ControlConfig,
    ) -> Self {
        Self {
            arbiter: ModeArbiter::new(),
            debouncer: KeyDebouncer::new(),
            driver: MotionDriver::new(),
            self_tx,
            events,
            sink,
            config,
        }
    }

    /// Process one command; returns true when the worker should exit.
    async fn handle_command(&mut self, cmd: ControlCommand) -> bool {
        match cmd {
            ControlCommand::Press(direction) => self.handle_press(direction).await,
            ControlCommand::Release(direction) => self.handle_release(direction).await,
            ControlCommand::ReleaseCheck {
                direction,
                pressed_at,
            } => self.handle_release_check(direction, pressed_at).await,
            ControlCommand::MotionTick {
                direction,
                generation,
            } => self.handle_tick(direction, generation).await,
            ControlCommand::ToggleMode => self.handle_toggle().await,
            ControlCommand::Home => self.handle_home().await,
            ControlCommand::Shutdown => {
                if !self.driver.is_idle() {
                    self.driver.clear();
                    self.send_stop().await;
                }
                return true;
            }
        }
        false
    }

    async fn handle_press(&mut self, direction: Direction) {
        if !self.arbiter.input_enabled() {
            log::debug!("ignoring press {} in automatic mode", direction.label());
            return;
        }

        // Every press re-arms the debounce timestamp, including repeats.
        self.debouncer.note_press(direction, Instant::now());

        match self.driver.press(direction) {
            PressOutcome::Engaged { generation } => {
                self.emit(ControlEvent::DirectionEngaged(direction)).await;
                self.assert_motion(direction).await;
                self.schedule_tick(direction, generation);
            }
            PressOutcome::AlreadyHeld => {}
        }
    }

    async fn handle_release(&mut self, direction: Direction) {
        if !self.arbiter.input_enabled() {
            return;
        }
        if !self.driver.is_held(direction) {
            return;
        }

        match self.debouncer.release_outcome(direction) {
            ReleaseOutcome::Deferred { pressed_at } => {
                // Defer the decision: a repeat press landing within the grace
                // window proves this release was mid-hold noise.
                let tx = self.self_tx.clone();
                let grace = self.config.grace_window;
                tokio::spawn(async move {
                    sleep(grace).await;
                    let _ = tx
                        .send(ControlCommand::ReleaseCheck {
                            direction,
                            pressed_at,
                        })
                        .await;
                });
            }
            ReleaseOutcome::Immediate => {
                // No press ever recorded (programmatic release): apply now.
                self.apply_release(direction).await;
            }
        }
    }

    async fn handle_release_check(&mut self, direction: Direction, pressed_at: Instant) {
        // A mode toggle may have cleared everything while the check was pending.
        if !self.driver.is_held(direction) {
            return;
        }
        match self.debouncer.release_outcome(direction) {
            ReleaseOutcome::Deferred { .. } if !self.debouncer.is_genuine(direction, pressed_at) => {
                log::debug!("suppressed duplicate release for {}", direction.label());
                return;
            }
            _ => {}
        }
        self.apply_release(direction).await;
    }

    async fn apply_release(&mut self, direction: Direction) {
        match self.driver.release(direction) {
            ReleaseEffect::NotHeld => {}
            ReleaseEffect::Removed => {
                self.emit(ControlEvent::DirectionReleased(direction)).await;
            }
            ReleaseEffect::AllStopped => {
                self.emit(ControlEvent::DirectionReleased(direction)).await;
                self.send_stop().await;
            }
        }
    }

    async fn handle_tick(&mut self, direction: Direction, generation: u64) {
        match self.driver.tick(direction, generation) {
            TickOutcome::Reassert => {
                self.assert_motion(direction).await;
                self.schedule_tick(direction, generation);
            }
            TickOutcome::Expired => {}
        }
    }

    async fn handle_toggle(&mut self) {
        match self.arbiter.toggle() {
            ModeTransition::EnteredAutomatic => {
                let was_held = self.driver.clear();
                self.debouncer.clear();
                for direction in was_held.iter() {
                    self.emit(ControlEvent::DirectionReleased(direction)).await;
                }
                if !was_held.is_empty() {
                    self.send_stop().await;
                }
            }
            ModeTransition::EnteredManual => {
                self.driver.clear();
                self.debouncer.clear();
            }
        }
        log::info!("mode: {}", self.arbiter.mode().label());
        self.emit(ControlEvent::ModeChanged(self.arbiter.mode())).await;
    }

    async fn handle_home(&mut self) {
        if !self.arbiter.input_enabled() {
            log::debug!("ignoring home command in automatic mode");
            return;
        }
        if let Err(err) = self.sink.home(self.config.home_speed).await {
            log::warn!("home command failed: {err}");
        }
        self.emit(ControlEvent::HomeCommanded).await;
    }

    async fn assert_motion(&self, direction: Direction) {
        let (azimuth, altitude) = direction.pan_delta();
        log::debug!("moving {}", direction.label());
        if let Err(err) = self.sink.pan_continuous_start(azimuth, altitude).await {
            log::warn!("pan start failed: {err}");
        }
    }

    async fn send_stop(&mut self) {
        if let Err(err) = self.sink.pan_continuous_stop().await {
            log::warn!("pan stop failed, assuming motion stopped: {err}");
        }
        self.emit(ControlEvent::MotionStopped).await;
    }

    fn schedule_tick(&self, direction: Direction, generation: u64) {
        let tx = self.self_tx.clone();
        let cadence = self.config.motion_cadence;
        tokio::spawn(async move {
            sleep(cadence).await;
            let _ = tx
                .send(ControlCommand::MotionTick {
                    direction,
                    generation,
                })
                .await;
        });
    }

    async fn emit(&self, event: ControlEvent) {
        // The console loop may already be gone during shutdown.
        let _ = self.events.send(event).await;
    }
}

//! Integration tests for the automatic-mode tracking loop: mode gating,
//! centering commands, and end-of-stream handling.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::time::{sleep, timeout, Duration};

use talos_console::control::Mode;
use talos_console::error::Result;
use talos_console::motion::sink::MotionSink;
use talos_console::tracking::{run_auto_tracking, BoundingBox, Frame, FrameSize, Tracker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SinkCall {
    Start { azimuth: i8, altitude: i8 },
    Stop,
}

#[derive(Default)]
struct RecordingSink {
    calls: Mutex<Vec<SinkCall>>,
}

impl RecordingSink {
    fn calls(&self) -> Vec<SinkCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MotionSink for RecordingSink {
    async fn pan_continuous_start(&self, azimuth: i8, altitude: i8) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(SinkCall::Start { azimuth, altitude });
        Ok(())
    }

    async fn pan_continuous_stop(&self) -> Result<()> {
        self.calls.lock().unwrap().push(SinkCall::Stop);
        Ok(())
    }

    async fn home(&self, _speed: u32) -> Result<()> {
        panic!("tracking loop must never home the arm");
    }
}

/// Tracker double replaying a fixed frame script, then end of stream.
struct ScriptedTracker {
    frames: VecDeque<Frame>,
}

impl ScriptedTracker {
    fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames: frames.into(),
        }
    }
}

#[async_trait]
impl Tracker for ScriptedTracker {
    async fn capture_frame(&mut self) -> Result<Option<Frame>> {
        Ok(self.frames.pop_front())
    }
}

fn frame_with_subject(x1: f32, y1: f32, x2: f32, y2: f32) -> Frame {
    Frame {
        boxes: vec![BoundingBox { x1, y1, x2, y2 }],
        size: FrameSize {
            width: 640.0,
            height: 480.0,
        },
    }
}

fn centered_frame() -> Frame {
    frame_with_subject(300.0, 220.0, 340.0, 260.0)
}

#[tokio::test(start_paused = true)]
async fn tracking_waits_for_automatic_mode() {
    let sink = Arc::new(RecordingSink::default());
    let (mode_tx, mode_rx) = watch::channel(Mode::Manual);
    let tracker = ScriptedTracker::new(vec![frame_with_subject(0.0, 0.0, 60.0, 60.0)]);

    let task = tokio::spawn(run_auto_tracking(
        tracker,
        Arc::clone(&sink) as Arc<dyn MotionSink>,
        mode_rx,
        Duration::from_millis(100),
    ));

    // Parked in manual mode: no frames consumed, no commands issued.
    sleep(Duration::from_millis(300)).await;
    assert!(sink.calls().is_empty());

    mode_tx.send(Mode::Automatic).unwrap();
    sleep(Duration::from_millis(50)).await;
    assert_eq!(
        sink.calls(),
        vec![SinkCall::Start {
            azimuth: 1,
            altitude: 1
        }]
    );

    drop(mode_tx);
    timeout(Duration::from_millis(500), task)
        .await
        .expect("tracking task did not exit")
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn centered_subject_stops_active_pan() {
    let sink = Arc::new(RecordingSink::default());
    let (mode_tx, mode_rx) = watch::channel(Mode::Automatic);
    let tracker = ScriptedTracker::new(vec![
        frame_with_subject(500.0, 100.0, 640.0, 200.0), // right and high
        centered_frame(),
    ]);

    let task = tokio::spawn(run_auto_tracking(
        tracker,
        Arc::clone(&sink) as Arc<dyn MotionSink>,
        mode_rx,
        Duration::from_millis(100),
    ));

    sleep(Duration::from_millis(250)).await;
    assert_eq!(
        sink.calls(),
        vec![
            SinkCall::Start {
                azimuth: -1,
                altitude: 1
            },
            SinkCall::Stop,
        ]
    );

    drop(mode_tx);
    timeout(Duration::from_millis(500), task)
        .await
        .expect("tracking task did not exit")
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn end_of_stream_is_treated_as_no_detections() {
    let sink = Arc::new(RecordingSink::default());
    let (mode_tx, mode_rx) = watch::channel(Mode::Automatic);
    // Script runs dry immediately: every capture is end of stream.
    let tracker = ScriptedTracker::new(vec![]);

    let task = tokio::spawn(run_auto_tracking(
        tracker,
        Arc::clone(&sink) as Arc<dyn MotionSink>,
        mode_rx,
        Duration::from_millis(100),
    ));

    sleep(Duration::from_millis(500)).await;
    assert!(sink.calls().is_empty());

    drop(mode_tx);
    timeout(Duration::from_millis(500), task)
        .await
        .expect("tracking task did not exit")
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn leaving_automatic_mode_stops_active_pan() {
    let sink = Arc::new(RecordingSink::default());
    let (mode_tx, mode_rx) = watch::channel(Mode::Automatic);
    // Subject stays off-center, so the loop keeps panning until mode flips.
    let tracker = ScriptedTracker::new(vec![
        frame_with_subject(0.0, 200.0, 60.0, 260.0),
        frame_with_subject(0.0, 200.0, 60.0, 260.0),
        frame_with_subject(0.0, 200.0, 60.0, 260.0),
    ]);

    let task = tokio::spawn(run_auto_tracking(
        tracker,
        Arc::clone(&sink) as Arc<dyn MotionSink>,
        mode_rx,
        Duration::from_millis(100),
    ));

    sleep(Duration::from_millis(150)).await;
    mode_tx.send(Mode::Manual).unwrap();
    sleep(Duration::from_millis(100)).await;

    let calls = sink.calls();
    assert_eq!(calls.last(), Some(&SinkCall::Stop));
    assert!(calls
        .iter()
        .take(calls.len() - 1)
        .all(|call| matches!(call, SinkCall::Start { azimuth: 1, .. })));

    drop(mode_tx);
    timeout(Duration::from_millis(500), task)
        .await
        .expect("tracking task did not exit")
        .unwrap();
}

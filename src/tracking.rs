//! Vision tracking boundary and the automatic-mode pan loop.
//!
//! The detector itself (face cascade, person model, ...) is an external
//! collaborator behind the `Tracker` trait; this module only decides how to
//! pan given the boxes it reports. End of stream is treated as "no detections
//! this frame", never as a fault.

use crate::control::mode::Mode;
use crate::error::Result;
use crate::motion::sink::MotionSink;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;

/// Fraction of the frame around its center where no correction is applied.
const CENTER_DEAD_BAND: f32 = 0.15;

/// Axis-aligned detection box in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    pub fn center(&self) -> (f32, f32) {
        ((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    pub fn area(&self) -> f32 {
        (self.x2 - self.x1).max(0.0) * (self.y2 - self.y1).max(0.0)
    }
}

/// Pixel dimensions of the captured frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSize {
    pub width: f32,
    pub height: f32,
}

/// Detections reported for one captured frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub boxes: Vec<BoundingBox>,
    pub size: FrameSize,
}

/// Source of per-frame detections (camera plus detector pipeline).
#[async_trait]
pub trait Tracker: Send {
    /// Capture the next frame and detect subjects in it. `Ok(None)` signals
    /// end of stream.
    async fn capture_frame(&mut self) -> Result<Option<Frame>>;
}

#[async_trait]
impl<T: Tracker + ?Sized> Tracker for Box<T> {
    async fn capture_frame(&mut self) -> Result<Option<Frame>> {
        (**self).capture_frame().await
    }
}

/// Unit pan deltas that would move the largest detected subject toward the
/// frame center. `None` when there is nothing to correct.
///
/// Frame y grows downward, so a subject above center needs altitude +1.
/// A subject left of center needs azimuth +1 (the arm's left-pan delta).
pub fn centering_pan(frame: &Frame) -> Option<(i8, i8)> {
    let target = frame
        .boxes
        .iter()
        .max_by(|a, b| a.area().total_cmp(&b.area()))?;

    let (cx, cy) = target.center();
    let dead_x = frame.size.width * CENTER_DEAD_BAND;
    let dead_y = frame.size.height * CENTER_DEAD_BAND;
    let offset_x = cx - frame.size.width / 2.0;
    let offset_y = cy - frame.size.height / 2.0;

    let azimuth = if offset_x < -dead_x {
        1
    } else if offset_x > dead_x {
        -1
    } else {
        0
    };
    let altitude = if offset_y < -dead_y {
        1
    } else if offset_y > dead_y {
        -1
    } else {
        0
    };

    if azimuth == 0 && altitude == 0 {
        None
    } else {
        Some((azimuth, altitude))
    }
}

/// Drive the sink from tracker detections while the mode channel reads
/// Automatic; park and wait for a mode change otherwise.
///
/// Exits (stopping any active pan) when the mode channel closes.
pub async fn run_auto_tracking<T: Tracker>(
    mut tracker: T,
    sink: Arc<dyn MotionSink>,
    mut mode_rx: watch::Receiver<Mode>,
    frame_interval: Duration,
) {
    let mut panning = false;

    loop {
        if *mode_rx.borrow() != Mode::Automatic {
            if panning {
                panning = false;
                if let Err(err) = sink.pan_continuous_stop().await {
                    log::warn!("tracking stop failed: {err}");
                }
            }
            if mode_rx.changed().await.is_err() {
                return;
            }
            continue;
        }

        let frame = match tracker.capture_frame().await {
            Ok(Some(frame)) => Some(frame),
            // End of stream: same as an empty frame, capture again later.
            Ok(None) => None,
            Err(err) => {
                log::warn!("tracker capture failed: {err}");
                None
            }
        };

        let correction = frame.as_ref().and_then(centering_pan);
        match correction {
            Some((azimuth, altitude)) => {
                panning = true;
                if let Err(err) = sink.pan_continuous_start(azimuth, altitude).await {
                    log::warn!("tracking pan failed: {err}");
                }
            }
            None => {
                if panning {
                    panning = false;
                    if let Err(err) = sink.pan_continuous_stop().await {
                        log::warn!("tracking stop failed: {err}");
                    }
                }
            }
        }

        // Wake early on mode changes so a toggle back to manual takes effect
        // without waiting out the frame interval.
        tokio::select! {
            _ = sleep(frame_interval) => {}
            changed = mode_rx.changed() => {
                if changed.is_err() {
                    if panning {
                        if let Err(err) = sink.pan_continuous_stop().await {
                            log::warn!("tracking stop failed: {err}");
                        }
                    }
                    return;
                }
            }
        }
    }
}

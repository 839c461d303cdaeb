//! The downstream motor command boundary.
//!
//! The arm's transport (ROS publisher, serial gimbal link, ...) lives behind
//! the `MotionSink` trait. The control worker never lets a transport failure
//! propagate: a failed command is logged and motion is assumed stopped.

use crate::error::Result;
use async_trait::async_trait;

/// Sink accepting continuous-pan and home commands for the camera arm.
#[async_trait]
pub trait MotionSink: Send + Sync {
    /// Begin (or re-assert) a continuous polar pan. Deltas are unit steps in
    /// {-1, 0, 1} for azimuth and altitude.
    async fn pan_continuous_start(&self, azimuth: i8, altitude: i8) -> Result<()>;

    /// Stop any continuous pan in progress.
    async fn pan_continuous_stop(&self) -> Result<()>;

    /// One-shot move back to the home position at the given speed.
    async fn home(&self, speed: u32) -> Result<()>;
}

/// Default sink that logs every command instead of publishing it.
///
/// Useful for bench runs without the arm attached.
#[derive(Debug, Default)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MotionSink for LogSink {
    async fn pan_continuous_start(&self, azimuth: i8, altitude: i8) -> Result<()> {
        log::info!("pan start: azimuth {azimuth:+} altitude {altitude:+}");
        Ok(())
    }

    async fn pan_continuous_stop(&self) -> Result<()> {
        log::info!("pan stop");
        Ok(())
    }

    async fn home(&self, speed: u32) -> Result<()> {
        log::info!("moving home at speed {speed}");
        Ok(())
    }
}

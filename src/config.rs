//! Configuration for the control core timing and motion parameters.
//!
//! The grace window and motion cadence were observed constants in the field;
//! they are exposed as configuration rather than derived from each other.

use crate::error::{Result, TalosError};
use std::time::Duration;

/// Grace window after a release before treating it as genuine, in milliseconds.
const DEFAULT_GRACE_WINDOW_MS: u64 = 100;
/// Interval between re-asserted pan commands while a direction is held.
const DEFAULT_MOTION_CADENCE_MS: u64 = 300;
/// Speed argument for the one-shot home command.
const DEFAULT_HOME_SPEED: u32 = 1000;
/// Interval between tracker frame captures in automatic mode.
const DEFAULT_FRAME_INTERVAL_MS: u64 = 100;

/// Timing and motion parameters for the control worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlConfig {
    /// How long to wait after a release before committing to it.
    pub grace_window: Duration,
    /// How often to re-assert the pan command while a direction is held.
    pub motion_cadence: Duration,
    /// Speed passed to `MotionSink::home`.
    pub home_speed: u32,
    /// Delay between tracker captures while in automatic mode.
    pub frame_interval: Duration,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            grace_window: Duration::from_millis(DEFAULT_GRACE_WINDOW_MS),
            motion_cadence: Duration::from_millis(DEFAULT_MOTION_CADENCE_MS),
            home_speed: DEFAULT_HOME_SPEED,
            frame_interval: Duration::from_millis(DEFAULT_FRAME_INTERVAL_MS),
        }
    }
}

impl ControlConfig {
    pub fn with_grace_window(mut self, grace_window: Duration) -> Self {
        self.grace_window = grace_window;
        self
    }

    pub fn with_motion_cadence(mut self, motion_cadence: Duration) -> Self {
        self.motion_cadence = motion_cadence;
        self
    }

    pub fn with_home_speed(mut self, home_speed: u32) -> Self {
        self.home_speed = home_speed;
        self
    }

    pub fn with_frame_interval(mut self, frame_interval: Duration) -> Self {
        self.frame_interval = frame_interval;
        self
    }

    /// Reject parameter combinations the worker cannot schedule.
    pub fn validate(&self) -> Result<()> {
        if self.motion_cadence.is_zero() {
            return Err(TalosError::config("motion cadence must be non-zero"));
        }
        if self.home_speed == 0 {
            return Err(TalosError::config("home speed must be positive"));
        }
        if self.frame_interval.is_zero() {
            return Err(TalosError::config("frame interval must be non-zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_observed_constants() {
        let config = ControlConfig::default();
        assert_eq!(config.grace_window, Duration::from_millis(100));
        assert_eq!(config.motion_cadence, Duration::from_millis(300));
        assert_eq!(config.home_speed, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builders_override_fields() {
        let config = ControlConfig::default()
            .with_grace_window(Duration::from_millis(50))
            .with_motion_cadence(Duration::from_millis(200))
            .with_home_speed(500);

        assert_eq!(config.grace_window, Duration::from_millis(50));
        assert_eq!(config.motion_cadence, Duration::from_millis(200));
        assert_eq!(config.home_speed, 500);
    }

    #[test]
    fn validate_rejects_degenerate_values() {
        let zero_cadence = ControlConfig::default().with_motion_cadence(Duration::ZERO);
        assert!(zero_cadence.validate().is_err());

        let zero_speed = ControlConfig::default().with_home_speed(0);
        assert!(zero_speed.validate().is_err());
    }
}

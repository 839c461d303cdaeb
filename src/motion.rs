//! Continuous-motion subsystem: held-direction state machine and the motor
//! command boundary.

pub mod driver;
pub mod sink;

pub use driver::{MotionDriver, PressOutcome, ReleaseEffect, TickOutcome};
pub use sink::{LogSink, MotionSink};

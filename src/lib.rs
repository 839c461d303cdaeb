//! # talos-console - Operator console for the Talos camera arm
//!
//! Terminal console driving a camera-carrying robotic arm. An operator pans
//! the camera with the arrow keys, or hands control to a vision tracker; the
//! crate's core is the continuous-motion arbiter that turns noisy
//! press/release streams into a clean start/stop command sequence for the
//! downstream motor transport.
//!
//! ## Architecture
//!
//! The library is organized into focused modules following modern Rust patterns:
//!
//! - [`error`] - Centralized error types and handling
//! - [`direction`] - Pan directions and the held-direction set
//! - [`input`] - Release debouncing and the keyboard surface
//! - [`motion`] - Continuous-motion state machine and the motor sink boundary
//! - [`control`] - Mode arbitration and the state-owning control worker
//! - [`tracking`] - Vision tracker boundary and the automatic-mode pan loop
//! - [`ui`] - Terminal console display
//! - [`app`] - Application core and component coordination
//!
//! All control state (held directions, press timestamps, mode) is owned by a
//! single worker task; timers and input surfaces communicate with it purely
//! through channels.

// Core modules
pub mod config;
pub mod direction;
pub mod error;

// Subsystems
pub mod control;
pub mod input;
pub mod motion;
pub mod tracking;
pub mod ui;

// Core components
pub mod app;

// Re-export commonly used types for convenience
pub use error::{Result, TalosError};

// Public API surface for external usage
pub use app::Application;
pub use config::ControlConfig;
pub use control::{ControlCommand, ControlEvent, Mode};
pub use direction::Direction;
pub use motion::{LogSink, MotionSink};
pub use tracking::Tracker;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

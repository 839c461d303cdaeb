//! Error types and handling infrastructure for talos-console.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types and `anyhow` for application-level error handling with context.
//!
//! The control core itself is deliberately infallible (total functions over its
//! own state); errors here come from the collaborators around it: the motor
//! command transport, the vision tracker, and the terminal.

use thiserror::Error;

/// The main error type for talos-console operations.
#[derive(Error, Debug)]
pub enum TalosError {
    /// Motor command transport failures (publish refused, link down, etc.)
    #[error("Motion sink failed: {message}")]
    SinkError { message: String },

    /// Vision tracker failures (capture device unavailable, model load, etc.)
    #[error("Tracker failed: {message}")]
    TrackerError { message: String },

    /// Terminal setup, rendering, or input polling errors
    #[error("Console operation failed: {message}")]
    ConsoleError {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Invalid configuration values (zero cadence, zero home speed, etc.)
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// A worker or surface channel closed while the application was still running
    #[error("Control channel closed: {message}")]
    ChannelClosed { message: String },

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for talos-console operations.
pub type Result<T> = std::result::Result<T, TalosError>;

impl TalosError {
    /// Create a SinkError with a descriptive message
    pub fn sink(message: impl Into<String>) -> Self {
        Self::SinkError {
            message: message.into(),
        }
    }

    /// Create a TrackerError with a descriptive message
    pub fn tracker(message: impl Into<String>) -> Self {
        Self::TrackerError {
            message: message.into(),
        }
    }

    /// Create a ConsoleError with a descriptive message
    pub fn console(message: impl Into<String>) -> Self {
        Self::ConsoleError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a ChannelClosed error with a descriptive message
    pub fn channel_closed(message: impl Into<String>) -> Self {
        Self::ChannelClosed {
            message: message.into(),
        }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

// Terminal and input polling surface io::Error; everything else wraps its own.
impl From<std::io::Error> for TalosError {
    fn from(err: std::io::Error) -> Self {
        Self::ConsoleError {
            message: "terminal io failed".to_string(),
            source: Some(err),
        }
    }
}

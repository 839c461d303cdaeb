//! Input subsystem: release debouncing and the keyboard surface.

pub mod debounce;
pub mod service;

// Public re-exports for convenience. Modules outside this crate should prefer
// importing from `crate::input` rather than reaching into submodules.
pub use debounce::{KeyDebouncer, ReleaseOutcome};
pub use service::{spawn_input_thread, InputMapper};

//! Control core: mode arbitration, worker protocol, and the worker loop that
//! owns all arbiter state.

pub mod mode;
pub mod protocol;
pub mod worker;

pub use mode::{Mode, ModeArbiter, ModeTransition};
pub use protocol::{ControlCommand, ControlEvent};
pub use worker::control_worker_loop;

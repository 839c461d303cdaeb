//! Manual/automatic mode arbitration.
//!
//! The arbiter is a two-state flag with side effects on transition. Manual
//! input is disabled via an explicit flag rather than by poisoning the held
//! set; the held set only ever means "physically held".

/// Control mode of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Operator-driven pan via buttons/keyboard.
    Manual,
    /// Vision-driven pan; manual affordances disabled.
    Automatic,
}

impl Mode {
    /// Label shown by the console ("Mode: Manual" / "Mode: Automatic").
    pub fn label(self) -> &'static str {
        match self {
            Mode::Manual => "Manual",
            Mode::Automatic => "Automatic",
        }
    }
}

/// Transition produced by a toggle, telling the worker which side effects
/// to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeTransition {
    /// Force-release all held directions and stop accepting manual input.
    EnteredAutomatic,
    /// Clear residual state and accept manual input again.
    EnteredManual,
}

/// Two-state arbiter gating the manual input path.
#[derive(Debug, Clone, Copy)]
pub struct ModeArbiter {
    mode: Mode,
    input_enabled: bool,
}

impl Default for ModeArbiter {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeArbiter {
    /// Starts in manual mode with input enabled.
    pub fn new() -> Self {
        Self {
            mode: Mode::Manual,
            input_enabled: true,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Whether manual press/release/home commands may be processed.
    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Flip the mode, returning the transition whose side effects the caller
    /// must apply.
    pub fn toggle(&mut self) -> ModeTransition {
        match self.mode {
            Mode::Manual => {
                self.mode = Mode::Automatic;
                self.input_enabled = false;
                ModeTransition::EnteredAutomatic
            }
            Mode::Automatic => {
                self.mode = Mode::Manual;
                self.input_enabled = true;
                ModeTransition::EnteredManual
            }
        }
    }
}

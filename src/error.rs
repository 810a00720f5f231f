//! Unified error types for the garage door controller.
//!
//! Every fallible controller call returns [`ControllerError`].  All variants
//! are `Copy` so they can be handed to event sinks and logged without
//! allocation.

use core::fmt;

use crate::state::RawInputs;

// ---------------------------------------------------------------------------
// Top-level controller error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerError {
    /// Pin setup failed at construction; the controller never touches
    /// hardware again.
    NotInitialized,
    /// Contradictory sensor combination.  Transient: skip this poll.
    ImpossibleInputs(RawInputs),
    /// A GPIO could not be configured, read, or written.
    Hardware(HardwareFault),
    /// A relay pulse did not complete as planned.
    ActuationInterrupted {
        /// Pulses that finished cleanly before the failure.
        completed_pulses: u8,
        cause: ActuatorError,
    },
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "controller not initialized"),
            Self::ImpossibleInputs(raw) => write!(f, "{}", ImpossibleInputs { inputs: *raw }),
            Self::Hardware(e) => write!(f, "hardware: {e}"),
            Self::ActuationInterrupted {
                completed_pulses,
                cause,
            } => write!(
                f,
                "actuation interrupted after {completed_pulses} pulse(s): {cause}"
            ),
        }
    }
}

impl core::error::Error for ControllerError {}

// ---------------------------------------------------------------------------
// Impossible inputs
// ---------------------------------------------------------------------------

/// Returned by the resolver when the inputs describe no physical state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImpossibleInputs {
    pub inputs: RawInputs,
}

impl fmt::Display for ImpossibleInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.inputs;
        write!(
            f,
            "physically impossible inputs (open={} close={} motor_open={} motor_close={})",
            u8::from(r.open_contact),
            u8::from(r.close_contact),
            u8::from(r.motor_opening),
            u8::from(r.motor_closing),
        )
    }
}

impl From<ImpossibleInputs> for ControllerError {
    fn from(e: ImpossibleInputs) -> Self {
        Self::ImpossibleInputs(e.inputs)
    }
}

// ---------------------------------------------------------------------------
// Hardware faults
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HardwareFault {
    /// Pin could not be opened / configured.
    PinSetup { pin: i32 },
    /// Input level read failed.
    InputRead { pin: i32 },
    /// Output level write failed.
    OutputWrite { pin: i32 },
}

impl fmt::Display for HardwareFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PinSetup { pin } => write!(f, "GPIO{pin} setup failed"),
            Self::InputRead { pin } => write!(f, "GPIO{pin} read failed"),
            Self::OutputWrite { pin } => write!(f, "GPIO{pin} write failed"),
        }
    }
}

impl From<HardwareFault> for ControllerError {
    fn from(e: HardwareFault) -> Self {
        Self::Hardware(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// Driving the relay active (LOW) failed.
    EngageFailed,
    /// Driving the relay back to inactive (HIGH) failed.
    RestoreFailed,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EngageFailed => write!(f, "relay engage failed"),
            Self::RestoreFailed => write!(f, "relay restore failed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

pub type Result<T> = core::result::Result<T, ControllerError>;

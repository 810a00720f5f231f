//! Outbound door events.
//!
//! The [`DoorService`](super::service::DoorService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  The bridge adapter forwards
//! `StateChanged` and the obstruction events to its characteristic store.

use crate::control::operator::{DesiredState, PulsePlan};
use crate::error::ControllerError;
use crate::state::{HomeKitState, PhysicalState, RawInputs};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorEvent {
    /// The service has started.  `initialized` is false after a pin setup failure.
    Started { initialized: bool },

    /// The resolved physical state changed since the last poll.
    StateChanged {
        from: PhysicalState,
        to: PhysicalState,
        homekit: HomeKitState,
        obstruction: bool,
    },

    /// A poll produced a contradictory reading and was skipped.
    ImpossibleInputs(RawInputs),

    ObstructionDetected,
    ObstructionCleared,

    /// An operate request was decided (and executed if the plan kicks).
    Actuated {
        desired: Option<DesiredState>,
        current: HomeKitState,
        plan: PulsePlan,
    },

    /// A poll or command failed for any other reason.
    Fault(ControllerError),
}

//! Inbound commands to the door service.
//!
//! These represent requests from the bridge that the
//! [`DoorService`](super::service::DoorService) executes one at a time on
//! its own loop.

use crate::control::operator::DesiredState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorCommand {
    /// Move toward the desired state.  `None` is a manual toggle.
    Operate(Option<DesiredState>),

    /// Re-read the sensors now instead of waiting for the next poll.
    Refresh,

    /// Drop a latched obstruction flag.
    ClearObstruction,
}

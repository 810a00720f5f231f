//! Raw inputs → validated [`PhysicalState`].
//!
//! Pure function, no I/O.  Contradictory readings (both limit switches, or
//! both motor directions) are rejected instead of guessed at: the caller
//! skips the poll and keeps its last known state.

use super::{DoorPosition, MotorMotion, PhysicalState, RawInputs};
use crate::error::ImpossibleInputs;

/// Resolve one set of raw inputs.
///
/// Closed takes priority over open, and closing motion over opening motion.
/// Both only matter for readings the conflict check already rejects.
pub fn resolve(inputs: RawInputs) -> Result<PhysicalState, ImpossibleInputs> {
    if inputs.contacts_conflict() || inputs.motion_conflicts() {
        return Err(ImpossibleInputs { inputs });
    }

    let position = if inputs.close_contact {
        DoorPosition::FullyClosed
    } else if inputs.open_contact {
        DoorPosition::FullyOpen
    } else {
        DoorPosition::Intermediate
    };

    let motion = if inputs.motor_closing {
        MotorMotion::ClosingMotion
    } else if inputs.motor_opening {
        MotorMotion::OpeningMotion
    } else {
        MotorMotion::Idle
    };

    Ok(PhysicalState::new(motion, position))
}

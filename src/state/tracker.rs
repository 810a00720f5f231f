//! Per-door session: last known state, change detection, obstruction latch.
//!
//! ## Obstruction lifecycle
//!
//! 1. The previous poll saw the motor closing.
//! 2. This poll sees the door `Open` or `Opening` without anyone having
//!    kicked the relay since: the opener reversed on its own.
//! 3. The flag latches.  Intermediate states do not clear it.
//! 4. It clears when the door is next seen resting fully closed, or when
//!    the caller clears it explicitly.

use log::{info, warn};

use super::{DoorPosition, HomeKitState, MotorMotion, PhysicalState};

/// Edge on the obstruction flag produced by a single observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstructionChange {
    Detected,
    Cleared,
}

/// Result of feeding one resolved state into the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub changed: bool,
    pub previous: PhysicalState,
    pub current: PhysicalState,
    pub obstruction: Option<ObstructionChange>,
}

/// Holds the state that must survive between polls.
#[derive(Debug, Clone)]
pub struct TransitionTracker {
    last: PhysicalState,
    obstruction: bool,
    /// Set when the relay was kicked while the door was closing, so a
    /// reversal seen on the next observation is not mistaken for an
    /// obstruction.  Consumed by that observation.
    reversal_commanded: bool,
}

impl Default for TransitionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl TransitionTracker {
    pub fn new() -> Self {
        Self {
            last: PhysicalState::SAFE_DEFAULT,
            obstruction: false,
            reversal_commanded: false,
        }
    }

    /// Compare `current` against the last known state and record it.
    pub fn observe(&mut self, current: PhysicalState) -> Transition {
        let previous = self.last;
        let changed = current != previous;
        self.last = current;

        let mut obstruction = None;

        let was_closing = previous.motion == MotorMotion::ClosingMotion;
        let now_opening = matches!(current.homekit(), HomeKitState::Open | HomeKitState::Opening);

        // A commanded reversal only excuses the observation right after the kick.
        let commanded = core::mem::take(&mut self.reversal_commanded);

        if was_closing && now_opening && !commanded && !self.obstruction {
            warn!("Obstruction: door reversed from {} to {}", previous, current);
            self.obstruction = true;
            obstruction = Some(ObstructionChange::Detected);
        } else if self.obstruction && current == Self::RESTING_CLOSED {
            info!("Obstruction cleared: door is fully closed");
            self.obstruction = false;
            obstruction = Some(ObstructionChange::Cleared);
        }

        Transition {
            changed,
            previous,
            current,
            obstruction,
        }
    }

    const RESTING_CLOSED: PhysicalState = PhysicalState::new(MotorMotion::Idle, DoorPosition::FullyClosed);

    /// Record that the relay was kicked while the door was closing.  Call only
    /// after a pulse actually completed.
    pub fn note_commanded_reversal(&mut self) {
        self.reversal_commanded = true;
    }

    /// Drop the obstruction latch.  Returns `true` if it was set.
    pub fn clear_obstruction(&mut self) -> bool {
        core::mem::replace(&mut self.obstruction, false)
    }

    pub fn last(&self) -> PhysicalState {
        self.last
    }

    pub fn obstruction(&self) -> bool {
        self.obstruction
    }
}

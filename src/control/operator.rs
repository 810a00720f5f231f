//! Door operator: (desired, current) → relay pulse plan.
//!
//! The opener has a single push-button input, so every movement is a
//! toggle.  The operator works out how many toggles get the door heading
//! where the caller wants it.
//!
//! | desired \ current | Open   | Closed | Opening  | Closing  | Stopped |
//! |-------------------|--------|--------|----------|----------|---------|
//! | Open              | none   | single | none     | reversal | single  |
//! | Closed            | single | none   | reversal | none     | single  |
//! | (unspecified)     | single | single | single   | single   | single  |
//!
//! A reversal is two kicks separated by a gap (stop, then go the other
//! way) under [`ReversalPolicy::DoublePulse`], or one kick under
//! [`ReversalPolicy::SinglePulse`].

use serde::{Deserialize, Serialize};

use crate::config::DoorConfig;
use crate::state::HomeKitState;

/// Target requested by the bridge.
///
/// Discriminants match the HomeKit `TargetDoorState` characteristic values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DesiredState {
    Open = 0,
    Closed = 1,
}

/// What the relay should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PulsePlan {
    NoPulse,
    SinglePulse,
    /// Two kicks with `gap_ms` of inactive relay between them.
    DoublePulse { gap_ms: u32 },
}

impl PulsePlan {
    /// Number of relay kicks this plan issues.
    pub fn pulse_count(self) -> u8 {
        match self {
            Self::NoPulse => 0,
            Self::SinglePulse => 1,
            Self::DoublePulse { .. } => 2,
        }
    }
}

/// How to turn a moving door around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReversalPolicy {
    DoublePulse { gap_ms: u32 },
    SinglePulse,
}

/// Pure decision table; holds only the reversal policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorOperator {
    reversal: ReversalPolicy,
}

impl DoorOperator {
    pub fn new(reversal: ReversalPolicy) -> Self {
        Self { reversal }
    }

    pub fn from_config(config: &DoorConfig) -> Self {
        let reversal = if config.double_pulse_reversal {
            ReversalPolicy::DoublePulse {
                gap_ms: config.reversal_gap_ms,
            }
        } else {
            ReversalPolicy::SinglePulse
        };
        Self::new(reversal)
    }

    pub fn reversal(&self) -> ReversalPolicy {
        self.reversal
    }

    /// Decide the pulse plan.  `None` means manual toggle: always one kick.
    pub fn decide(&self, desired: Option<DesiredState>, current: HomeKitState) -> PulsePlan {
        use DesiredState as D;
        use HomeKitState as H;

        let Some(desired) = desired else {
            return PulsePlan::SinglePulse;
        };

        match (desired, current) {
            // Already there, or already heading there.
            (D::Open, H::Open | H::Opening) | (D::Closed, H::Closed | H::Closing) => PulsePlan::NoPulse,
            // At rest somewhere else: one toggle starts it moving.
            (D::Open, H::Closed | H::Stopped) | (D::Closed, H::Open | H::Stopped) => PulsePlan::SinglePulse,
            // Moving the wrong way.
            (D::Open, H::Closing) | (D::Closed, H::Opening) => self.reverse(),
        }
    }

    fn reverse(&self) -> PulsePlan {
        match self.reversal {
            ReversalPolicy::DoublePulse { gap_ms } => PulsePlan::DoublePulse { gap_ms },
            ReversalPolicy::SinglePulse => PulsePlan::SinglePulse,
        }
    }
}

impl Default for DoorOperator {
    fn default() -> Self {
        Self::from_config(&DoorConfig::default())
    }
}

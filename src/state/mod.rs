//! Door state model: raw inputs, physical state, and the fixed status table.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────────┐
//! │  STATUS_TABLE  (MotorMotion × DoorPosition → DoorStatus)               │
//! │  ┌───────────────┬──────────────────┬──────────────────┬─────────────┐ │
//! │  │               │ FullyClosed      │ FullyOpen        │ Intermediate│ │
//! │  ├───────────────┼──────────────────┼──────────────────┼─────────────┤ │
//! │  │ Idle          │ Closed           │ Open             │ Stopped     │ │
//! │  │ OpeningMotion │ Opening          │ Opening          │ Opening     │ │
//! │  │ ClosingMotion │ Closing          │ Closing          │ Closing     │ │
//! │  └───────────────┴──────────────────┴──────────────────┴─────────────┘ │
//! └────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The table is the single source of truth for what a pair of
//! (motion, position) means to the outside world.  Everything else in the
//! crate asks [`PhysicalState::status`] rather than re-deriving it.

pub mod resolver;
pub mod tracker;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Raw inputs
// ---------------------------------------------------------------------------

/// The four digital input levels, sampled together on one poll.
///
/// `true` means the contact / motion signal is active (input reads HIGH).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawInputs {
    /// Fully-open limit switch.
    pub open_contact: bool,
    /// Fully-closed limit switch.
    pub close_contact: bool,
    /// Motor energised in the opening direction.
    pub motor_opening: bool,
    /// Motor energised in the closing direction.
    pub motor_closing: bool,
}

impl RawInputs {
    /// Both limit switches at once: the door cannot be fully open and fully closed.
    pub fn contacts_conflict(&self) -> bool {
        self.open_contact && self.close_contact
    }

    /// Both motion signals at once: the motor cannot turn both ways.
    pub fn motion_conflicts(&self) -> bool {
        self.motor_opening && self.motor_closing
    }
}

// ---------------------------------------------------------------------------
// Position / motion
// ---------------------------------------------------------------------------

/// Where the door is, as far as the limit switches can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum DoorPosition {
    FullyClosed = 0,
    FullyOpen = 1,
    Intermediate = 2,
}

impl DoorPosition {
    pub const COUNT: usize = 3;
    pub const ALL: [Self; Self::COUNT] = [Self::FullyClosed, Self::FullyOpen, Self::Intermediate];
}

/// What the motor is doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum MotorMotion {
    Idle = 0,
    OpeningMotion = 1,
    ClosingMotion = 2,
}

impl MotorMotion {
    pub const COUNT: usize = 3;
    pub const ALL: [Self; Self::COUNT] = [Self::Idle, Self::OpeningMotion, Self::ClosingMotion];
}

// ---------------------------------------------------------------------------
// Outward-facing state
// ---------------------------------------------------------------------------

/// Door status as exposed to the smart-home bridge.
///
/// Discriminants match the HomeKit `CurrentDoorState` characteristic values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum HomeKitState {
    Open = 0,
    Closed = 1,
    Opening = 2,
    Closing = 3,
    Stopped = 4,
}

/// One row of the status table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorStatus {
    /// Short label reported to callers ("fully closed", "in motion opening", ...).
    pub label: &'static str,
    /// Sentence used when logging transitions.
    pub description: &'static str,
    pub homekit: HomeKitState,
}

const fn status(label: &'static str, description: &'static str, homekit: HomeKitState) -> DoorStatus {
    DoorStatus {
        label,
        description,
        homekit,
    }
}

/// Indexed `[MotorMotion as usize][DoorPosition as usize]`.
static STATUS_TABLE: [[DoorStatus; DoorPosition::COUNT]; MotorMotion::COUNT] = [
    // Idle
    [
        status("fully closed", "Door is fully closed", HomeKitState::Closed),
        status("fully open", "Door is fully open", HomeKitState::Open),
        status(
            "stopped intermediate",
            "Door is stopped in an intermediate position",
            HomeKitState::Stopped,
        ),
    ],
    // OpeningMotion
    [
        status(
            "started opening from closed",
            "Door just started moving to open from fully closed",
            HomeKitState::Opening,
        ),
        status(
            "completing open",
            "Door is completing motion to fully open",
            HomeKitState::Opening,
        ),
        status("in motion opening", "Door is in motion to open", HomeKitState::Opening),
    ],
    // ClosingMotion
    [
        status(
            "completing closed",
            "Door is completing motion to fully closed",
            HomeKitState::Closing,
        ),
        status(
            "started closing from open",
            "Door just started moving to closed from fully open",
            HomeKitState::Closing,
        ),
        status("in motion closing", "Door is in motion to closed", HomeKitState::Closing),
    ],
];

// ---------------------------------------------------------------------------
// Physical state
// ---------------------------------------------------------------------------

/// The (motion, position) pair resolved from one set of raw inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhysicalState {
    pub motion: MotorMotion,
    pub position: DoorPosition,
}

impl PhysicalState {
    /// Assumed state before the first successful reading.
    pub const SAFE_DEFAULT: Self = Self::new(MotorMotion::Idle, DoorPosition::FullyClosed);

    pub const fn new(motion: MotorMotion, position: DoorPosition) -> Self {
        Self { motion, position }
    }

    /// Table entry for this state.
    pub fn status(self) -> &'static DoorStatus {
        &STATUS_TABLE[self.motion as usize][self.position as usize]
    }

    pub fn homekit(self) -> HomeKitState {
        self.status().homekit
    }

    pub fn label(self) -> &'static str {
        self.status().label
    }

    /// Every one of the nine physical states, row by row.
    pub fn all() -> impl Iterator<Item = Self> {
        MotorMotion::ALL
            .into_iter()
            .flat_map(|motion| DoorPosition::ALL.into_iter().map(move |position| Self::new(motion, position)))
    }
}

impl Default for PhysicalState {
    fn default() -> Self {
        Self::SAFE_DEFAULT
    }
}

impl core::fmt::Display for PhysicalState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}/{:?}", self.motion, self.position)
    }
}

//! Default GPIO assignments for the opener board.
//!
//! Used as [`DoorConfig`](crate::config::DoorConfig) defaults; every pin can
//! be overridden from the bridge configuration.

// ---------------------------------------------------------------------------
// Relay (door motor push-button, active LOW)
// ---------------------------------------------------------------------------

/// Digital output: LOW energises the relay coil and "presses" the wall button.
pub const RELAY_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Limit switches (pull-down inputs, HIGH = contact made)
// ---------------------------------------------------------------------------

/// Reed switch at the top of travel.
pub const OPEN_CONTACT_GPIO: i32 = 5;
/// Reed switch at the bottom of travel.
pub const CLOSE_CONTACT_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Motor motion sense (pull-down inputs, HIGH = motor energised)
// ---------------------------------------------------------------------------

pub const MOTOR_OPEN_GPIO: i32 = 7;
pub const MOTOR_CLOSE_GPIO: i32 = 15;

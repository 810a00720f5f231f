//! Sensor subsystem.
//!
//! The door has exactly one sensor group: [`ContactSensors`], which samples
//! the two limit switches and the two motor-motion signals as a single
//! [`RawInputs`](crate::state::RawInputs) per poll.

pub mod contacts;

pub use contacts::ContactSensors;

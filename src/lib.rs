//! Garage door controller library.
//!
//! Exposes the pure-logic modules for integration testing.  ESP-IDF-specific
//! code (`adapters::hardware`, the binary) is gated behind the `espidf`
//! feature; everything else builds and tests on the host.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod sensors;
pub mod state;

mod pins;

pub use app::controller::{GarageDoorController, StatusReport};
pub use control::operator::{DesiredState, PulsePlan};
pub use error::ControllerError;
pub use state::{HomeKitState, PhysicalState, RawInputs};

//! Actuator drivers.

pub mod relay;

pub use relay::{EngagedRelay, RelayActuator};

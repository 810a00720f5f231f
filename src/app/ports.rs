//! Port traits — the hexagonal boundary between door logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ GarageDoorController (domain)
//! ```
//!
//! Driven adapters (contact sensors, relay, event sinks) implement these
//! traits.  The controller consumes them via generics, so the domain core
//! never touches GPIO registers directly.

use crate::error::{ActuatorError, HardwareFault};
use crate::state::RawInputs;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the four door inputs, sampled together.
pub trait SensorPort {
    /// Read every input.  No side effects beyond the read.
    fn read(&mut self) -> Result<RawInputs, HardwareFault>;
}

// ───────────────────────────────────────────────────────────────
// Relay port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the motor push-button relay.
///
/// Implementations MUST leave the relay inactive when `pulse` returns,
/// whether it returns `Ok`, `Err`, or unwinds.
pub trait RelayPort {
    /// Hold the relay active for `duration_ms`, then release it.
    fn pulse(&mut self, duration_ms: u32) -> Result<(), ActuatorError>;

    /// Wait `gap_ms` with the relay inactive.
    fn rest(&mut self, gap_ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / bridge)
// ───────────────────────────────────────────────────────────────

/// The service emits structured [`DoorEvent`](super::events::DoorEvent)s
/// through this port.  Adapters decide where they go (serial log, bridge
/// characteristic store, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::DoorEvent);
}

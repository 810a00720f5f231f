//! Door configuration parameters
//!
//! Pin assignments and timing for one door.  The bridge hands these over as
//! JSON at construction time; field aliases accept the bridge's historical
//! key names (`openclose_timeout`, `heartbeat_interval`).

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::pins;

/// Polling is only enabled for intervals strictly above this.
pub const MIN_POLL_INTERVAL_MS: u32 = 100;

/// Core door configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorConfig {
    /// Accessory name, used in log lines.
    pub name: String,

    // --- Pins ---
    pub relay_pin: i32,
    pub open_pin: i32,
    pub close_pin: i32,
    pub motor_motion_open_pin: i32,
    pub motor_motion_close_pin: i32,

    // --- Timing ---
    /// How long the relay is held active for one kick (milliseconds)
    #[serde(alias = "openclose_timeout")]
    pub openclose_timeout_ms: u32,
    /// Status poll interval (milliseconds); polling is off at or below 100
    #[serde(alias = "heartbeat_interval")]
    pub poll_interval_ms: u32,
    /// Inactive gap between the two kicks of a reversal (milliseconds)
    pub reversal_gap_ms: u32,

    // --- Behaviour ---
    /// Reverse a moving door with two kicks (stop, then go).  When false a
    /// single kick is sent and the opener's own behaviour decides.
    pub double_pulse_reversal: bool,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            name: String::from("Garage Door"),

            relay_pin: pins::RELAY_GPIO,
            open_pin: pins::OPEN_CONTACT_GPIO,
            close_pin: pins::CLOSE_CONTACT_GPIO,
            motor_motion_open_pin: pins::MOTOR_OPEN_GPIO,
            motor_motion_close_pin: pins::MOTOR_CLOSE_GPIO,

            openclose_timeout_ms: 400,
            poll_interval_ms: 1000, // 1 Hz
            reversal_gap_ms: 1000,

            double_pulse_reversal: true,
        }
    }
}

impl DoorConfig {
    /// Parse the bridge's JSON config block and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Malformed)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that could not drive a door safely.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.openclose_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed("openclose_timeout_ms must be > 0"));
        }
        if self.double_pulse_reversal && self.reversal_gap_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "reversal_gap_ms must be > 0 when double_pulse_reversal is enabled",
            ));
        }

        let pins = self.pins();
        if pins.iter().any(|&p| p < 0) {
            return Err(ConfigError::ValidationFailed("pin numbers must be non-negative"));
        }
        for (i, a) in pins.iter().enumerate() {
            if pins[i + 1..].contains(a) {
                return Err(ConfigError::DuplicatePin(*a));
            }
        }
        Ok(())
    }

    /// Whether the periodic status poll should run at all.
    pub fn polling_enabled(&self) -> bool {
        self.poll_interval_ms > MIN_POLL_INTERVAL_MS
    }

    /// All five pins: relay, open, close, motor-open, motor-close.
    pub fn pins(&self) -> [i32; 5] {
        [
            self.relay_pin,
            self.open_pin,
            self.close_pin,
            self.motor_motion_open_pin,
            self.motor_motion_close_pin,
        ]
    }
}

/// Errors from configuration parsing and validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Not valid JSON, or a field has the wrong type.
    Malformed,
    /// A field failed range validation.
    ValidationFailed(&'static str),
    /// The same GPIO is assigned to two functions.
    DuplicatePin(i32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "config malformed"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::DuplicatePin(pin) => write!(f, "GPIO{} assigned twice", pin),
        }
    }
}

impl core::error::Error for ConfigError {}

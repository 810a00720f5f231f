//! Opener relay driver (active-LOW).
//!
//! The relay contacts sit in parallel with the wall button.  Driving the pin
//! LOW closes the contacts, which the opener sees as one button press; HIGH
//! is the resting level.
//!
//! ## Restoration contract
//!
//! Every pulse ends with the pin HIGH, on every exit path.  The active
//! window is held by an [`EngagedRelay`] guard whose `Drop` drives the pin
//! back HIGH if the pulse did not finish normally (error or panic during the
//! delay).  A stuck-LOW relay holds the button down, and most openers then
//! refuse all further commands.
//!
//! Generic over `embedded_hal` 1.0 `OutputPin` + `DelayNs`, so the host tests
//! drive it with simulated pins.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{Error as _, OutputPin};
use log::{debug, error, warn};

use crate::app::ports::RelayPort;
use crate::error::{ActuatorError, HardwareFault};

pub struct RelayActuator<P, D> {
    pin: P,
    delay: D,
    gpio: i32,
    pulses: u32,
}

impl<P: OutputPin, D: DelayNs> RelayActuator<P, D> {
    /// Take ownership of the pin and drive it to the inactive level.
    pub fn new(mut pin: P, delay: D, gpio: i32) -> Result<Self, HardwareFault> {
        pin.set_high().map_err(|e| {
            error!("Relay GPIO{} initial HIGH failed: {:?}", gpio, e.kind());
            HardwareFault::OutputWrite { pin: gpio }
        })?;
        debug!("Relay on GPIO{} idle (HIGH)", gpio);
        Ok(Self {
            pin,
            delay,
            gpio,
            pulses: 0,
        })
    }

    /// Completed pulses since construction.
    pub fn pulse_count(&self) -> u32 {
        self.pulses
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }
}

impl<P: OutputPin, D: DelayNs> RelayPort for RelayActuator<P, D> {
    fn pulse(&mut self, duration_ms: u32) -> Result<(), ActuatorError> {
        let engaged = EngagedRelay::engage(&mut self.pin, self.gpio)?;
        self.delay.delay_ms(duration_ms);
        engaged.release()?;

        self.pulses += 1;
        debug!("Relay GPIO{} pulsed for {} ms", self.gpio, duration_ms);
        Ok(())
    }

    fn rest(&mut self, gap_ms: u32) {
        self.delay.delay_ms(gap_ms);
    }
}

/// Relay held in the active (LOW) state.
///
/// Dropping the guard without calling [`release`](Self::release), or after
/// a failed release, drives the pin HIGH.
pub struct EngagedRelay<'a, P: OutputPin> {
    pin: &'a mut P,
    gpio: i32,
    released: bool,
}

impl<'a, P: OutputPin> EngagedRelay<'a, P> {
    pub fn engage(pin: &'a mut P, gpio: i32) -> Result<Self, ActuatorError> {
        // Guard exists before the write so a half-applied LOW still gets undone.
        let mut guard = Self {
            pin,
            gpio,
            released: false,
        };
        guard.pin.set_low().map_err(|e| {
            error!("Relay GPIO{} engage failed: {:?}", gpio, e.kind());
            ActuatorError::EngageFailed
        })?;
        Ok(guard)
    }

    /// End the pulse normally.
    pub fn release(mut self) -> Result<(), ActuatorError> {
        match self.pin.set_high() {
            Ok(()) => {
                self.released = true;
                Ok(())
            }
            Err(e) => {
                error!("Relay GPIO{} restore failed: {:?}; retrying", self.gpio, e.kind());
                Err(ActuatorError::RestoreFailed)
            }
        }
    }
}

impl<P: OutputPin> Drop for EngagedRelay<'_, P> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.pin.set_high() {
            error!("Relay GPIO{} could not be restored HIGH: {:?}", self.gpio, e.kind());
        } else {
            warn!("Relay GPIO{} restored HIGH on abnormal exit", self.gpio);
        }
    }
}

//! Door limit switches and motor-motion signals.
//!
//! Four digital inputs, each wired active-HIGH with a pull-down so a
//! disconnected sensor reads inactive:
//!
//! | Input          | HIGH means                         |
//! |----------------|------------------------------------|
//! | open contact   | door at the fully-open limit       |
//! | close contact  | door at the fully-closed limit     |
//! | motor open     | motor energised toward open        |
//! | motor close    | motor energised toward close       |
//!
//! The driver is generic over `embedded_hal::digital::InputPin`, so the same
//! code runs on ESP-IDF `PinDriver`s and on test doubles.

use embedded_hal::digital::{Error as _, InputPin};
use log::warn;

use crate::app::ports::SensorPort;
use crate::config::DoorConfig;
use crate::error::HardwareFault;
use crate::state::RawInputs;

/// One input pin plus the GPIO number it was opened on.
struct SensePin<P> {
    pin: P,
    gpio: i32,
}

impl<P: InputPin> SensePin<P> {
    fn level(&mut self) -> Result<bool, HardwareFault> {
        self.pin.is_high().map_err(|e| {
            warn!("GPIO{} read failed: {:?}", self.gpio, e.kind());
            HardwareFault::InputRead { pin: self.gpio }
        })
    }
}

pub struct ContactSensors<P> {
    open: SensePin<P>,
    close: SensePin<P>,
    motor_open: SensePin<P>,
    motor_close: SensePin<P>,
}

impl<P: InputPin> ContactSensors<P> {
    /// Wrap four already-configured input pins.  GPIO numbers for log lines
    /// and faults come from `config`.
    pub fn new(open: P, close: P, motor_open: P, motor_close: P, config: &DoorConfig) -> Self {
        Self {
            open: SensePin {
                pin: open,
                gpio: config.open_pin,
            },
            close: SensePin {
                pin: close,
                gpio: config.close_pin,
            },
            motor_open: SensePin {
                pin: motor_open,
                gpio: config.motor_motion_open_pin,
            },
            motor_close: SensePin {
                pin: motor_close,
                gpio: config.motor_motion_close_pin,
            },
        }
    }
}

impl<P: InputPin> SensorPort for ContactSensors<P> {
    fn read(&mut self) -> Result<RawInputs, HardwareFault> {
        Ok(RawInputs {
            open_contact: self.open.level()?,
            close_contact: self.close.level()?,
            motor_opening: self.motor_open.level()?,
            motor_closing: self.motor_close.level()?,
        })
    }
}

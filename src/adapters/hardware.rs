//! Hardware adapter — opens the door's GPIOs on ESP-IDF.
//!
//! This is the only module that touches real peripherals.  It builds the
//! concrete [`ContactSensors`] and [`RelayActuator`] over `esp-idf-hal`
//! `PinDriver`s; everything above it works against the port traits.
//!
//! Pin numbers come from [`DoorConfig`] at runtime, so pins are taken with
//! `AnyIOPin::new` rather than from `Peripherals`.  `main` must not also
//! claim the same GPIOs through `Peripherals`.

use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, Input, Output, PinDriver, Pull};
use log::{error, info};

use crate::config::DoorConfig;
use crate::drivers::relay::RelayActuator;
use crate::error::HardwareFault;
use crate::sensors::ContactSensors;

pub type EspInput = PinDriver<'static, AnyIOPin, Input>;
pub type EspOutput = PinDriver<'static, AnyOutputPin, Output>;

pub type EspSensors = ContactSensors<EspInput>;
pub type EspRelay = RelayActuator<EspOutput, FreeRtos>;

/// Open all five pins.  The relay is driven HIGH before any input is
/// configured.
pub fn open_door_hardware(config: &DoorConfig) -> Result<(EspSensors, EspRelay), HardwareFault> {
    let relay_pin = open_output(config.relay_pin)?;
    let relay = RelayActuator::new(relay_pin, FreeRtos, config.relay_pin)?;

    let sensors = ContactSensors::new(
        open_input(config.open_pin)?,
        open_input(config.close_pin)?,
        open_input(config.motor_motion_open_pin)?,
        open_input(config.motor_motion_close_pin)?,
        config,
    );

    info!("Door GPIOs configured");
    Ok((sensors, relay))
}

fn open_output(gpio: i32) -> Result<EspOutput, HardwareFault> {
    // SAFETY: each GPIO number is claimed exactly once, here, and the
    // numbers were checked for duplicates by `DoorConfig::validate`.
    let pin = unsafe { AnyOutputPin::new(gpio) };
    PinDriver::output(pin).map_err(|e| {
        error!("GPIO{} output setup failed: {}", gpio, e);
        HardwareFault::PinSetup { pin: gpio }
    })
}

fn open_input(gpio: i32) -> Result<EspInput, HardwareFault> {
    // SAFETY: see `open_output`.
    let pin = unsafe { AnyIOPin::new(gpio) };
    let mut driver = PinDriver::input(pin).map_err(|e| {
        error!("GPIO{} input setup failed: {}", gpio, e);
        HardwareFault::PinSetup { pin: gpio }
    })?;
    // Active-HIGH sensors: a floating input must read inactive.
    driver.set_pull(Pull::Down).map_err(|e| {
        error!("GPIO{} pull-down failed: {}", gpio, e);
        HardwareFault::PinSetup { pin: gpio }
    })?;
    Ok(driver)
}

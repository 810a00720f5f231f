//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing door events to the ESP-IDF logger
//! (UART / USB-CDC in production).  A bridge adapter forwarding to HomeKit
//! characteristics would implement the same trait.

use log::{error, info, warn};

use crate::app::events::DoorEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`DoorEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink {
    emitted: u32,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events logged since construction.
    pub fn emitted(&self) -> u32 {
        self.emitted
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &DoorEvent) {
        self.emitted = self.emitted.wrapping_add(1);
        match event {
            DoorEvent::Started { initialized } => {
                info!("START | initialized={}", initialized);
            }
            DoorEvent::StateChanged {
                from,
                to,
                homekit,
                obstruction,
            } => {
                info!(
                    "STATE | {} -> {} | {} | homekit={:?}({}) obstruction={}",
                    from,
                    to,
                    to.label(),
                    homekit,
                    *homekit as u8,
                    obstruction
                );
            }
            DoorEvent::ImpossibleInputs(raw) => {
                warn!(
                    "INPUT | impossible: open={} close={} motor_open={} motor_close={}",
                    raw.open_contact, raw.close_contact, raw.motor_opening, raw.motor_closing
                );
            }
            DoorEvent::ObstructionDetected => {
                warn!("OBSTR | detected (door reversed while closing)");
            }
            DoorEvent::ObstructionCleared => {
                info!("OBSTR | cleared");
            }
            DoorEvent::Actuated {
                desired,
                current,
                plan,
            } => {
                info!(
                    "RELAY | desired={:?} current={:?} plan={:?} kicks={}",
                    desired,
                    current,
                    plan,
                    plan.pulse_count()
                );
            }
            DoorEvent::Fault(e) => {
                error!("FAULT | {}", e);
            }
        }
    }
}

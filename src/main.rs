//! Garage door controller — ESP-IDF entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │   ContactSensors   RelayActuator   LogEventSink  Clock   │
//! │   (SensorPort)     (RelayPort)     (EventSink)           │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ───────────────     │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │   DoorService ─▶ GarageDoorController (pure logic) │  │
//! │  │   resolver · tracker · operator                    │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use log::{info, warn};

use garagedoor::adapters::hardware::open_door_hardware;
use garagedoor::adapters::log_sink::LogEventSink;
use garagedoor::adapters::time::UptimeClock;
use garagedoor::app::channels::COMMAND_CHANNEL;
use garagedoor::app::controller::GarageDoorController;
use garagedoor::app::service::DoorService;
use garagedoor::config::DoorConfig;

/// Loop tick.  Commands are picked up within one tick; polling runs at the
/// configured interval on top of this.
const TICK_MS: u32 = 10;

/// Build-time config override (JSON, same keys the bridge uses).
const CONFIG_JSON: Option<&str> = option_env!("GARAGEDOOR_CONFIG");

fn load_config() -> DoorConfig {
    let Some(json) = CONFIG_JSON else {
        info!("No GARAGEDOOR_CONFIG at build time, using defaults");
        return DoorConfig::default();
    };
    match DoorConfig::from_json(json) {
        Ok(config) => {
            info!("Config loaded from GARAGEDOOR_CONFIG");
            config
        }
        Err(e) => {
            warn!("Config rejected ({}), using defaults", e);
            DoorConfig::default()
        }
    }
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Garage door controller v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Config + hardware ──────────────────────────────────
    let config = load_config();
    let controller = GarageDoorController::from_setup(config, open_door_hardware);

    // ── 3. Service loop ───────────────────────────────────────
    let clock = UptimeClock::new();
    let mut sink = LogEventSink::new();
    let mut service = DoorService::new(controller);
    service.start(clock.uptime_ms(), &mut sink);

    let commands = COMMAND_CHANNEL.receiver();
    loop {
        service.run_once(clock.uptime_ms(), &commands, &mut sink);
        FreeRtos::delay_ms(TICK_MS);
    }
}

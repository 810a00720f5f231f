//! Fuzz target: `DoorConfig::from_json` + `validate`
//!
//! Arbitrary bytes must never panic the config parser, and any config that
//! validates must have five distinct, non-negative pins.
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use garagedoor::config::DoorConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    let Ok(config) = DoorConfig::from_json(text) else {
        return;
    };
    if config.validate().is_ok() {
        let pins = config.pins();
        for (i, a) in pins.iter().enumerate() {
            assert!(*a >= 0);
            assert!(!pins[i + 1..].contains(a));
        }
    }
});

//! Fuzz target: resolver + transition tracker over arbitrary input streams
//!
//! Each byte's low nibble is one raw sample (open, close, motor open,
//! motor close); bit 4 asks for a commanded reversal before the sample.
//! Verifies:
//! - `resolve` errors exactly on contradictory samples
//! - rejected samples never change the tracked state
//! - resting fully closed always clears the obstruction latch
//!
//! cargo fuzz run fuzz_door_session

#![no_main]

use garagedoor::state::resolver::resolve;
use garagedoor::state::tracker::TransitionTracker;
use garagedoor::state::{PhysicalState, RawInputs};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut tracker = TransitionTracker::new();

    for &byte in data {
        let inputs = RawInputs {
            open_contact: byte & 0b0001 != 0,
            close_contact: byte & 0b0010 != 0,
            motor_opening: byte & 0b0100 != 0,
            motor_closing: byte & 0b1000 != 0,
        };
        if byte & 0b1_0000 != 0 {
            tracker.note_commanded_reversal();
        }

        let before = tracker.last();
        match resolve(inputs) {
            Ok(state) => {
                assert!(!inputs.contacts_conflict() && !inputs.motion_conflicts());
                let t = tracker.observe(state);
                assert_eq!(t.changed, state != before);
                if state == PhysicalState::SAFE_DEFAULT {
                    assert!(!tracker.obstruction());
                }
            }
            Err(e) => {
                assert!(inputs.contacts_conflict() || inputs.motion_conflicts());
                assert_eq!(e.inputs, inputs);
                assert_eq!(tracker.last(), before);
            }
        }
    }
});

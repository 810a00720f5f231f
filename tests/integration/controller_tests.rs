//! GarageDoorController integration tests.
//!
//! Drives the controller through realistic door cycles using mock sensors
//! and a recording relay.

use garagedoor::app::controller::GarageDoorController;
use garagedoor::config::DoorConfig;
use garagedoor::control::operator::{DesiredState, PulsePlan};
use garagedoor::error::{ActuatorError, ControllerError, HardwareFault};
use garagedoor::state::tracker::ObstructionChange;
use garagedoor::state::{DoorPosition, HomeKitState, MotorMotion, PhysicalState};

use crate::mock_hw::*;

type TestController = GarageDoorController<MockSensors, MockRelay>;

fn rig(initial: garagedoor::state::RawInputs) -> (TestController, DoorRig) {
    rig_with(DoorConfig::default(), initial)
}

fn rig_with(config: DoorConfig, initial: garagedoor::state::RawInputs) -> (TestController, DoorRig) {
    let door = DoorRig::new(initial);
    let (sensors, relay) = door.adapters();
    (GarageDoorController::new(config, sensors, relay), door)
}

// ── check_status ──────────────────────────────────────────────

#[test]
fn first_poll_of_closed_door_is_not_a_change() {
    let (mut c, _door) = rig(CLOSED);
    let report = c.check_status().unwrap();
    assert!(!report.changed);
    assert_eq!(report.label, "fully closed");
    assert_eq!(report.homekit, HomeKitState::Closed);
    assert!(!report.obstruction);
}

#[test]
fn repeated_polls_are_idempotent() {
    let (mut c, _door) = rig(OPEN);
    assert!(c.check_status().unwrap().changed);
    for _ in 0..5 {
        let report = c.check_status().unwrap();
        assert!(!report.changed);
        assert_eq!(report.label, "fully open");
    }
}

#[test]
fn change_report_carries_previous_state() {
    let (mut c, door) = rig(CLOSED);
    c.check_status().unwrap();

    door.set(OPENING);
    let report = c.check_status().unwrap();
    assert!(report.changed);
    assert_eq!(report.previous, PhysicalState::SAFE_DEFAULT);
    assert_eq!(
        report.state,
        PhysicalState::new(MotorMotion::OpeningMotion, DoorPosition::Intermediate)
    );
    assert_eq!(report.label, "in motion opening");
    assert_eq!(report.homekit, HomeKitState::Opening);
}

#[test]
fn impossible_inputs_keep_last_state() {
    let (mut c, door) = rig(OPEN);
    c.check_status().unwrap();

    door.set(BOTH_CONTACTS);
    assert_eq!(c.check_status(), Err(ControllerError::ImpossibleInputs(BOTH_CONTACTS)));
    assert_eq!(c.last_state().homekit(), HomeKitState::Open);

    // Recovery is a plain poll; no change since the last good state.
    door.set(OPEN);
    assert!(!c.check_status().unwrap().changed);
}

#[test]
fn read_fault_surfaces_as_hardware_error() {
    let (mut c, door) = rig(CLOSED);
    door.fail_reads(HardwareFault::InputRead { pin: 6 });
    assert_eq!(
        c.check_status(),
        Err(ControllerError::Hardware(HardwareFault::InputRead { pin: 6 }))
    );
}

// ── operate ───────────────────────────────────────────────────

#[test]
fn full_open_close_cycle() {
    let (mut c, door) = rig(CLOSED);

    // Closed → request open: one kick of openclose_timeout_ms.
    assert_eq!(c.operate(Some(DesiredState::Open)), Ok(PulsePlan::SinglePulse));
    assert_eq!(door.relay_calls(), vec![RelayCall::Pulse { duration_ms: 400 }]);
    door.clear_calls();

    // Already heading there.
    door.set(OPENING);
    assert_eq!(c.operate(Some(DesiredState::Open)), Ok(PulsePlan::NoPulse));
    door.set(OPEN);
    assert_eq!(c.operate(Some(DesiredState::Open)), Ok(PulsePlan::NoPulse));
    assert!(door.relay_calls().is_empty());

    // Open → request close.
    assert_eq!(c.operate(Some(DesiredState::Closed)), Ok(PulsePlan::SinglePulse));
    door.set(CLOSING);
    assert_eq!(c.operate(Some(DesiredState::Closed)), Ok(PulsePlan::NoPulse));
    door.set(CLOSED);
    assert_eq!(c.check_status().unwrap().homekit, HomeKitState::Closed);

    assert_eq!(door.pulses(), 1);
    assert!(!c.obstruction());
}

#[test]
fn reversal_while_closing_double_kicks() {
    let (mut c, door) = rig(CLOSING);

    let plan = c.operate(Some(DesiredState::Open)).unwrap();
    assert_eq!(plan, PulsePlan::DoublePulse { gap_ms: 1000 });
    assert_eq!(
        door.relay_calls(),
        vec![
            RelayCall::Pulse { duration_ms: 400 },
            RelayCall::Rest { gap_ms: 1000 },
            RelayCall::Pulse { duration_ms: 400 },
        ]
    );

    // The commanded reversal must not look like an obstruction.
    door.set(OPENING);
    let report = c.check_status().unwrap();
    assert_eq!(report.homekit, HomeKitState::Opening);
    assert!(!report.obstruction);
    assert_eq!(report.obstruction_change, None);
}

#[test]
fn reversal_while_opening_double_kicks() {
    let (mut c, door) = rig(OPENING);
    assert_eq!(
        c.operate(Some(DesiredState::Closed)),
        Ok(PulsePlan::DoublePulse { gap_ms: 1000 })
    );
    assert_eq!(door.pulses(), 2);
}

#[test]
fn single_pulse_reversal_policy() {
    let mut config = DoorConfig::default();
    config.double_pulse_reversal = false;
    let (mut c, door) = rig_with(config, CLOSING);

    assert_eq!(c.operate(Some(DesiredState::Open)), Ok(PulsePlan::SinglePulse));
    assert_eq!(door.pulses(), 1);
}

#[test]
fn manual_toggle_always_kicks_once() {
    for inputs in [CLOSED, OPEN, OPENING, CLOSING, STOPPED] {
        let (mut c, door) = rig(inputs);
        assert_eq!(c.operate(None), Ok(PulsePlan::SinglePulse));
        assert_eq!(door.pulses(), 1);
    }
}

#[test]
fn stopped_door_kicks_once_either_way() {
    for desired in [DesiredState::Open, DesiredState::Closed] {
        let (mut c, door) = rig(STOPPED);
        assert_eq!(c.operate(Some(desired)), Ok(PulsePlan::SinglePulse));
        assert_eq!(door.pulses(), 1);
    }
}

#[test]
fn operate_on_impossible_inputs_never_kicks() {
    let (mut c, door) = rig(BOTH_CONTACTS);
    assert_eq!(
        c.operate(Some(DesiredState::Open)),
        Err(ControllerError::ImpossibleInputs(BOTH_CONTACTS))
    );
    assert!(door.relay_calls().is_empty());
}

#[test]
fn engage_failure_reports_zero_completed_pulses() {
    let (mut c, door) = rig(CLOSED);
    door.fail_next_pulse(ActuatorError::EngageFailed);
    assert_eq!(
        c.operate(Some(DesiredState::Open)),
        Err(ControllerError::ActuationInterrupted {
            completed_pulses: 0,
            cause: ActuatorError::EngageFailed,
        })
    );
}

#[test]
fn custom_timing_reaches_relay() {
    let mut config = DoorConfig::default();
    config.openclose_timeout_ms = 250;
    config.reversal_gap_ms = 600;
    let (mut c, door) = rig_with(config, OPENING);

    c.operate(Some(DesiredState::Closed)).unwrap();
    assert_eq!(
        door.relay_calls(),
        vec![
            RelayCall::Pulse { duration_ms: 250 },
            RelayCall::Rest { gap_ms: 600 },
            RelayCall::Pulse { duration_ms: 250 },
        ]
    );
}

// ── obstruction ───────────────────────────────────────────────

#[test]
fn uncommanded_reversal_latches_until_closed() {
    let (mut c, door) = rig(CLOSING);
    c.check_status().unwrap();

    door.set(OPENING);
    let report = c.check_status().unwrap();
    assert!(report.obstruction);
    assert_eq!(report.obstruction_change, Some(ObstructionChange::Detected));

    // Latched through open and stopped states.
    door.set(OPEN);
    assert!(c.check_status().unwrap().obstruction);
    door.set(STOPPED);
    assert!(c.check_status().unwrap().obstruction);

    door.set(CLOSED);
    let report = c.check_status().unwrap();
    assert!(!report.obstruction);
    assert_eq!(report.obstruction_change, Some(ObstructionChange::Cleared));
}

#[test]
fn failed_kick_while_closing_does_not_mask_obstruction() {
    let (mut c, door) = rig(CLOSING);
    door.fail_next_pulse(ActuatorError::EngageFailed);
    assert_eq!(
        c.operate(Some(DesiredState::Open)),
        Err(ControllerError::ActuationInterrupted {
            completed_pulses: 0,
            cause: ActuatorError::EngageFailed,
        })
    );

    // Relay never fired, so a reversal now is the opener's own.
    door.set(OPENING);
    let report = c.check_status().unwrap();
    assert!(report.obstruction);
    assert_eq!(report.obstruction_change, Some(ObstructionChange::Detected));
}

#[test]
fn ignored_kick_does_not_mask_later_obstruction() {
    let mut config = DoorConfig::default();
    config.double_pulse_reversal = false;
    let (mut c, door) = rig_with(config, CLOSING);

    assert_eq!(c.operate(Some(DesiredState::Open)), Ok(PulsePlan::SinglePulse));

    // Opener kept closing, then reversed on its own later in the run.
    assert!(!c.check_status().unwrap().obstruction);
    door.set(OPENING);
    let report = c.check_status().unwrap();
    assert_eq!(report.obstruction_change, Some(ObstructionChange::Detected));
}

#[test]
fn operate_report_keeps_status_when_relay_fails() {
    let (mut c, door) = rig(OPEN);
    door.fail_next_pulse(ActuatorError::EngageFailed);

    let report = c.operate_reported(Some(DesiredState::Closed)).unwrap();
    assert!(report.status.changed);
    assert_eq!(report.status.homekit, HomeKitState::Open);
    assert_eq!(report.plan, PulsePlan::SinglePulse);
    assert_eq!(
        report.outcome,
        Err(ControllerError::ActuationInterrupted {
            completed_pulses: 0,
            cause: ActuatorError::EngageFailed,
        })
    );
}

#[test]
fn obstruction_can_be_cleared_explicitly() {
    let (mut c, door) = rig(CLOSING);
    c.check_status().unwrap();
    door.set(OPEN);
    c.check_status().unwrap();
    assert!(c.obstruction());

    assert!(c.clear_obstruction());
    assert!(!c.obstruction());
    assert!(!c.clear_obstruction());
}

// ── setup failure ─────────────────────────────────────────────

#[test]
fn failed_setup_never_touches_hardware() {
    let door = DoorRig::new(CLOSED);
    let mut c: TestController = GarageDoorController::from_setup(DoorConfig::default(), |cfg| {
        Err(HardwareFault::PinSetup {
            pin: cfg.motor_motion_close_pin,
        })
    });

    assert_eq!(c.check_status(), Err(ControllerError::NotInitialized));
    assert_eq!(c.operate(None), Err(ControllerError::NotInitialized));
    assert_eq!(door.reads(), 0);
    assert_eq!(c.setup_fault(), Some(HardwareFault::PinSetup { pin: 15 }));
}

//! Mock hardware adapters for integration tests.
//!
//! Sensor levels and the relay call log live behind shared handles so a
//! test can move the "door" and inspect the relay after handing the
//! adapters to a controller.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use garagedoor::app::events::DoorEvent;
use garagedoor::app::ports::{EventSink, RelayPort, SensorPort};
use garagedoor::error::{ActuatorError, HardwareFault};
use garagedoor::state::RawInputs;

// ── Door positions as raw inputs ──────────────────────────────

pub const CLOSED: RawInputs = RawInputs {
    open_contact: false,
    close_contact: true,
    motor_opening: false,
    motor_closing: false,
};

pub const OPEN: RawInputs = RawInputs {
    open_contact: true,
    close_contact: false,
    motor_opening: false,
    motor_closing: false,
};

pub const OPENING: RawInputs = RawInputs {
    open_contact: false,
    close_contact: false,
    motor_opening: true,
    motor_closing: false,
};

pub const CLOSING: RawInputs = RawInputs {
    open_contact: false,
    close_contact: false,
    motor_opening: false,
    motor_closing: true,
};

pub const STOPPED: RawInputs = RawInputs {
    open_contact: false,
    close_contact: false,
    motor_opening: false,
    motor_closing: false,
};

pub const BOTH_CONTACTS: RawInputs = RawInputs {
    open_contact: true,
    close_contact: true,
    motor_opening: false,
    motor_closing: false,
};

// ── MockSensors ───────────────────────────────────────────────

/// Sensors whose reading is controlled through a [`DoorRig`].
pub struct MockSensors {
    inputs: Rc<Cell<Result<RawInputs, HardwareFault>>>,
    pub reads: Rc<Cell<u32>>,
}

impl SensorPort for MockSensors {
    fn read(&mut self) -> Result<RawInputs, HardwareFault> {
        self.reads.set(self.reads.get() + 1);
        self.inputs.get()
    }
}

// ── MockRelay ─────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayCall {
    Pulse { duration_ms: u32 },
    Rest { gap_ms: u32 },
}

pub struct MockRelay {
    calls: Rc<RefCell<Vec<RelayCall>>>,
    fail_next: Rc<Cell<Option<ActuatorError>>>,
}

impl RelayPort for MockRelay {
    fn pulse(&mut self, duration_ms: u32) -> Result<(), ActuatorError> {
        if let Some(e) = self.fail_next.take() {
            return Err(e);
        }
        self.calls.borrow_mut().push(RelayCall::Pulse { duration_ms });
        Ok(())
    }

    fn rest(&mut self, gap_ms: u32) {
        self.calls.borrow_mut().push(RelayCall::Rest { gap_ms });
    }
}

// ── DoorRig: test-side handles ────────────────────────────────

#[derive(Clone)]
pub struct DoorRig {
    inputs: Rc<Cell<Result<RawInputs, HardwareFault>>>,
    reads: Rc<Cell<u32>>,
    calls: Rc<RefCell<Vec<RelayCall>>>,
    fail_next: Rc<Cell<Option<ActuatorError>>>,
}

#[allow(dead_code)]
impl DoorRig {
    pub fn new(initial: RawInputs) -> Self {
        Self {
            inputs: Rc::new(Cell::new(Ok(initial))),
            reads: Rc::new(Cell::new(0)),
            calls: Rc::new(RefCell::new(Vec::new())),
            fail_next: Rc::new(Cell::new(None)),
        }
    }

    pub fn adapters(&self) -> (MockSensors, MockRelay) {
        (
            MockSensors {
                inputs: self.inputs.clone(),
                reads: self.reads.clone(),
            },
            MockRelay {
                calls: self.calls.clone(),
                fail_next: self.fail_next.clone(),
            },
        )
    }

    pub fn set(&self, inputs: RawInputs) {
        self.inputs.set(Ok(inputs));
    }

    pub fn fail_reads(&self, fault: HardwareFault) {
        self.inputs.set(Err(fault));
    }

    pub fn fail_next_pulse(&self, error: ActuatorError) {
        self.fail_next.set(Some(error));
    }

    pub fn reads(&self) -> u32 {
        self.reads.get()
    }

    pub fn relay_calls(&self) -> Vec<RelayCall> {
        self.calls.borrow().clone()
    }

    pub fn pulses(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, RelayCall::Pulse { .. }))
            .count()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<DoorEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state_changes(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, DoorEvent::StateChanged { .. }))
            .count()
    }

    pub fn contains(&self, event: &DoorEvent) -> bool {
        self.events.contains(event)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &DoorEvent) {
        self.events.push(*event);
    }
}

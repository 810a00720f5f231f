//! Garage door controller — the hexagonal core for one door.
//!
//! [`GarageDoorController`] owns the session state (last physical state,
//! obstruction latch) and the two hardware ports.  It exposes the two calls
//! the bridge needs:
//!
//! ```text
//!  SensorPort ──▶ resolve ──▶ TransitionTracker ──▶ check_status()
//!
//!  operate(desired) ──▶ check_status() ──▶ DoorOperator ──▶ RelayPort
//! ```
//!
//! Construction with failed pin setup yields a controller that answers
//! every call with [`ControllerError::NotInitialized`] and never touches
//! hardware.

use log::{debug, error, info, warn};

use crate::config::DoorConfig;
use crate::control::operator::{DesiredState, DoorOperator, PulsePlan};
use crate::error::{ActuatorError, ControllerError, HardwareFault, Result};
use crate::state::resolver::resolve;
use crate::state::tracker::{ObstructionChange, TransitionTracker};
use crate::state::{HomeKitState, PhysicalState};

use super::ports::{RelayPort, SensorPort};

/// Answer to one `check_status()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReport {
    pub changed: bool,
    pub previous: PhysicalState,
    pub state: PhysicalState,
    pub label: &'static str,
    pub homekit: HomeKitState,
    /// Latched obstruction flag after this poll.
    pub obstruction: bool,
    /// Edge on the obstruction flag caused by this poll, if any.
    pub obstruction_change: Option<ObstructionChange>,
}

/// Answer to one `operate_reported()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperateReport {
    /// The poll `operate` took before deciding.
    pub status: StatusReport,
    pub plan: PulsePlan,
    /// Relay result; `Err` is always `ActuationInterrupted`.
    pub outcome: Result<()>,
}

struct DoorHardware<S, R> {
    sensors: S,
    relay: R,
}

pub struct GarageDoorController<S, R> {
    config: DoorConfig,
    /// `None` once pin setup failed; never re-acquired.
    hw: Option<DoorHardware<S, R>>,
    setup_fault: Option<HardwareFault>,
    session: TransitionTracker,
    operator: DoorOperator,
}

impl<S: SensorPort, R: RelayPort> GarageDoorController<S, R> {
    /// Construct around already-opened ports.
    pub fn new(config: DoorConfig, sensors: S, relay: R) -> Self {
        info!(
            "Garage door '{}' initialized (relay=GPIO{}, open=GPIO{}, close=GPIO{}, motor_open=GPIO{}, motor_close=GPIO{})",
            config.name,
            config.relay_pin,
            config.open_pin,
            config.close_pin,
            config.motor_motion_open_pin,
            config.motor_motion_close_pin
        );
        Self {
            operator: DoorOperator::from_config(&config),
            config,
            hw: Some(DoorHardware { sensors, relay }),
            setup_fault: None,
            session: TransitionTracker::new(),
        }
    }

    /// Construct a controller that is permanently failed.
    pub fn failed(config: DoorConfig, fault: HardwareFault) -> Self {
        error!("Garage door '{}' initialization failed: {}", config.name, fault);
        Self {
            operator: DoorOperator::from_config(&config),
            config,
            hw: None,
            setup_fault: Some(fault),
            session: TransitionTracker::new(),
        }
    }

    /// Run `setup` to open the pins and construct accordingly.
    ///
    /// Setup is attempted exactly once; a failure is not retried.
    pub fn from_setup<F>(config: DoorConfig, setup: F) -> Self
    where
        F: FnOnce(&DoorConfig) -> core::result::Result<(S, R), HardwareFault>,
    {
        match setup(&config) {
            Ok((sensors, relay)) => Self::new(config, sensors, relay),
            Err(fault) => Self::failed(config, fault),
        }
    }

    // ── Status ────────────────────────────────────────────────

    /// Read the sensors, resolve, and record the result.
    ///
    /// On `ImpossibleInputs` or a read fault the session is left untouched.
    pub fn check_status(&mut self) -> Result<StatusReport> {
        let hw = self.hw.as_mut().ok_or(ControllerError::NotInitialized)?;

        let inputs = hw.sensors.read()?;
        let state = match resolve(inputs) {
            Ok(state) => state,
            Err(impossible) => {
                warn!("{}: {}; skipping poll", self.config.name, impossible);
                return Err(impossible.into());
            }
        };

        let transition = self.session.observe(state);
        if transition.changed {
            info!(
                "{}: state change {} -> {}: {}",
                self.config.name,
                transition.previous,
                transition.current,
                state.status().description
            );
        }

        Ok(StatusReport {
            changed: transition.changed,
            previous: transition.previous,
            state,
            label: state.label(),
            homekit: state.homekit(),
            obstruction: self.session.obstruction(),
            obstruction_change: transition.obstruction,
        })
    }

    // ── Operation ─────────────────────────────────────────────

    /// Move the door toward `desired` (`None` = unconditional toggle).
    ///
    /// Returns the plan that was executed.
    pub fn operate(&mut self, desired: Option<DesiredState>) -> Result<PulsePlan> {
        let report = self.operate_reported(desired)?;
        report.outcome.map(|()| report.plan)
    }

    /// Like [`operate`](Self::operate), but also hands back the status poll
    /// taken before deciding, even when the relay then fails.
    ///
    /// Errors only if that poll failed; relay failures land in `outcome`.
    pub fn operate_reported(&mut self, desired: Option<DesiredState>) -> Result<OperateReport> {
        let status = self.check_status()?;
        let plan = self.operator.decide(desired, status.homekit);
        info!(
            "{}: operate desired={:?} current={:?} -> {:?}",
            self.config.name, desired, status.homekit, plan
        );

        let outcome = self.execute(plan, status.homekit);
        Ok(OperateReport { status, plan, outcome })
    }

    fn execute(&mut self, plan: PulsePlan, current: HomeKitState) -> Result<()> {
        let hw = self.hw.as_mut().ok_or(ControllerError::NotInitialized)?;
        let duration_ms = self.config.openclose_timeout_ms;

        let first = match plan {
            PulsePlan::NoPulse => {
                debug!("No relay pulse needed");
                return Ok(());
            }
            PulsePlan::SinglePulse | PulsePlan::DoublePulse { .. } => hw.relay.pulse(duration_ms),
        };
        first.map_err(interrupted(0))?;

        // The opener saw a kick while closing; its reversal is ours, not an obstruction.
        if current == HomeKitState::Closing {
            self.session.note_commanded_reversal();
        }

        if let PulsePlan::DoublePulse { gap_ms } = plan {
            hw.relay.rest(gap_ms);
            hw.relay.pulse(duration_ms).map_err(interrupted(1))?;
        }
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn is_initialized(&self) -> bool {
        self.hw.is_some()
    }

    /// The pin setup fault that put the controller in failed mode, if any.
    pub fn setup_fault(&self) -> Option<HardwareFault> {
        self.setup_fault
    }

    /// Last successfully resolved state (safe default before the first poll).
    pub fn last_state(&self) -> PhysicalState {
        self.session.last()
    }

    pub fn obstruction(&self) -> bool {
        self.session.obstruction()
    }

    /// Drop the obstruction latch.  Returns `true` if it was set.
    pub fn clear_obstruction(&mut self) -> bool {
        let was_set = self.session.clear_obstruction();
        if was_set {
            info!("{}: obstruction cleared by request", self.config.name);
        }
        was_set
    }

    pub fn config(&self) -> &DoorConfig {
        &self.config
    }
}

fn interrupted(completed_pulses: u8) -> impl Fn(ActuatorError) -> ControllerError {
    move |cause| {
        error!("Relay actuation interrupted after {} pulse(s): {}", completed_pulses, cause);
        ControllerError::ActuationInterrupted {
            completed_pulses,
            cause,
        }
    }
}

//! Door service — the single owner loop around one controller.
//!
//! [`DoorService`] is the only place `check_status()` and `operate()` are
//! called from, which serializes them.  Each `run_once` call:
//!
//! 1. Executes every pending [`DoorCommand`] in arrival order.
//! 2. Polls the sensors if the poll interval has elapsed.
//! 3. Emits [`DoorEvent`]s for anything the bridge should know about.
//!
//! ```text
//!  CommandReceiver ──▶ ┌──────────────────────┐ ──▶ EventSink
//!                      │     DoorService      │
//!      clock (ms) ───▶ │  GarageDoorController │
//!                      └──────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::error::ControllerError;
use crate::state::tracker::ObstructionChange;
use crate::state::{HomeKitState, PhysicalState};

use super::channels::CommandReceiver;
use super::commands::DoorCommand;
use super::controller::{GarageDoorController, StatusReport};
use super::events::DoorEvent;
use super::ports::{EventSink, RelayPort, SensorPort};

pub struct DoorService<S, R> {
    controller: GarageDoorController<S, R>,
    /// Uptime (ms) of the last periodic poll; `None` before the first.
    last_poll_ms: Option<u64>,
    polls: u64,
}

impl<S: SensorPort, R: RelayPort> DoorService<S, R> {
    pub fn new(controller: GarageDoorController<S, R>) -> Self {
        Self {
            controller,
            last_poll_ms: None,
            polls: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce startup and take an initial reading so the bridge has a
    /// state before the first poll interval elapses.  The reading counts as
    /// the poll at `now_ms`.
    pub fn start(&mut self, now_ms: u64, sink: &mut impl EventSink) {
        let initialized = self.controller.is_initialized();
        sink.emit(&DoorEvent::Started { initialized });

        if !initialized {
            warn!("Door service started without hardware; all requests will fail");
            return;
        }

        let polling = self.controller.config().polling_enabled();
        if polling {
            info!(
                "Polling every {} ms for state transitions",
                self.controller.config().poll_interval_ms
            );
        } else {
            info!("Polling disabled (interval <= 100 ms); state refreshes on request only");
        }

        self.last_poll_ms = Some(now_ms);
        self.refresh(sink, true);
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// Drain pending commands, then poll if due.
    pub fn run_once(&mut self, now_ms: u64, commands: &CommandReceiver<'_>, sink: &mut impl EventSink) {
        while let Ok(command) = commands.try_receive() {
            // Failures were already emitted as events.
            let _ = self.handle_command(command, sink);
        }

        if self.poll_due(now_ms) {
            self.last_poll_ms = Some(now_ms);
            self.polls += 1;
            self.refresh(sink, false);
        }
    }

    /// Execute one command immediately.
    pub fn handle_command(&mut self, command: DoorCommand, sink: &mut impl EventSink) -> Result<(), ControllerError> {
        debug!("Command: {:?}", command);
        match command {
            DoorCommand::Operate(desired) => {
                let report = match self.controller.operate_reported(desired) {
                    Ok(report) => report,
                    Err(e) => {
                        self.emit_error(e, sink);
                        return Err(e);
                    }
                };
                // operate() polls first; surface whatever that poll saw.
                self.forward(&report.status, sink);
                match report.outcome {
                    Ok(()) => {
                        sink.emit(&DoorEvent::Actuated {
                            desired,
                            current: report.status.homekit,
                            plan: report.plan,
                        });
                        Ok(())
                    }
                    Err(e) => {
                        self.emit_error(e, sink);
                        Err(e)
                    }
                }
            }
            DoorCommand::Refresh => match self.controller.check_status() {
                Ok(report) => {
                    self.forward(&report, sink);
                    Ok(())
                }
                Err(e) => {
                    self.emit_error(e, sink);
                    Err(e)
                }
            },
            DoorCommand::ClearObstruction => {
                if self.controller.clear_obstruction() {
                    sink.emit(&DoorEvent::ObstructionCleared);
                }
                Ok(())
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Last known state without touching hardware (bridge `get` requests).
    pub fn current_state(&self) -> PhysicalState {
        self.controller.last_state()
    }

    pub fn current_homekit(&self) -> HomeKitState {
        self.controller.last_state().homekit()
    }

    pub fn obstruction(&self) -> bool {
        self.controller.obstruction()
    }

    /// Periodic polls executed since startup.
    pub fn poll_count(&self) -> u64 {
        self.polls
    }

    pub fn controller(&self) -> &GarageDoorController<S, R> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut GarageDoorController<S, R> {
        &mut self.controller
    }

    // ── Internal ──────────────────────────────────────────────

    fn poll_due(&self, now_ms: u64) -> bool {
        let config = self.controller.config();
        if !config.polling_enabled() || !self.controller.is_initialized() {
            return false;
        }
        match self.last_poll_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= u64::from(config.poll_interval_ms),
        }
    }

    /// Poll once.  `announce` forces a `StateChanged` even if unchanged.
    fn refresh(&mut self, sink: &mut impl EventSink, announce: bool) {
        match self.controller.check_status() {
            Ok(report) if announce && !report.changed => {
                sink.emit(&DoorEvent::StateChanged {
                    from: report.previous,
                    to: report.state,
                    homekit: report.homekit,
                    obstruction: report.obstruction,
                });
            }
            Ok(report) => self.forward(&report, sink),
            Err(e) => self.emit_error(e, sink),
        }
    }

    fn forward(&self, report: &StatusReport, sink: &mut impl EventSink) {
        match report.obstruction_change {
            Some(ObstructionChange::Detected) => sink.emit(&DoorEvent::ObstructionDetected),
            Some(ObstructionChange::Cleared) => sink.emit(&DoorEvent::ObstructionCleared),
            None => {}
        }
        if report.changed {
            sink.emit(&DoorEvent::StateChanged {
                from: report.previous,
                to: report.state,
                homekit: report.homekit,
                obstruction: report.obstruction,
            });
        }
    }

    fn emit_error(&self, error: ControllerError, sink: &mut impl EventSink) {
        match error {
            ControllerError::ImpossibleInputs(raw) => sink.emit(&DoorEvent::ImpossibleInputs(raw)),
            other => {
                warn!("Door request failed: {}", other);
                sink.emit(&DoorEvent::Fault(other));
            }
        }
    }
}

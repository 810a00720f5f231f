//! Command channel into the door service loop.
//!
//! Uses an `embassy-sync` bounded channel so the bridge task can hand
//! commands to the single loop that owns the controller.  That loop is the
//! only caller of `check_status()` / `operate()`, which keeps them serialized.
//!
//! ```text
//! ┌──────────────┐  DoorCommand  ┌──────────────┐
//! │ Bridge task  │─────────────▶│ Door service │
//! └──────────────┘               └──────────────┘
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};

use super::commands::DoorCommand;

/// Channel depth for inbound commands.
pub const COMMAND_DEPTH: usize = 4;

pub type CommandChannel = Channel<CriticalSectionRawMutex, DoorCommand, COMMAND_DEPTH>;
pub type CommandSender<'a> = Sender<'a, CriticalSectionRawMutex, DoorCommand, COMMAND_DEPTH>;
pub type CommandReceiver<'a> = Receiver<'a, CriticalSectionRawMutex, DoorCommand, COMMAND_DEPTH>;

/// Process-wide command channel: bridge → door service.
pub static COMMAND_CHANNEL: CommandChannel = Channel::new();

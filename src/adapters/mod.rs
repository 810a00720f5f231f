//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements            | Connects to              |
//! |------------|-----------------------|--------------------------|
//! | `hardware` | SensorPort, RelayPort | ESP32 GPIO (espidf only) |
//! | `log_sink` | EventSink             | Serial log output        |
//! | `time`     | —                     | ESP32 system timer       |

#[cfg(feature = "espidf")]
pub mod hardware;
pub mod log_sink;
pub mod time;

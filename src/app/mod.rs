//! Application boundary — events and port traits.
//!
//! The monitor core (watchdog, debouncer, indicator, scheduler) talks to
//! GPIO, the shell, the network, and the clock only through the **port
//! traits** defined in [`ports`], keeping it fully testable without a
//! Raspberry Pi or a running Asterisk.

pub mod events;
pub mod ports;

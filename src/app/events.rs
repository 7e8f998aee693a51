//! Outbound monitor events.
//!
//! The [`Scheduler`](crate::scheduler::Scheduler) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  The production adapter
//! logs them; tests record them.

use crate::app::ports::{Address, CommandError};
use crate::error::GpioError;
use crate::monitor::cos::UnkeyReason;

/// Structured events emitted by the monitor core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonitorEvent {
    /// Start-up finished; carries the initial COS level.
    Started { cos_active: bool },

    /// The node was keyed on a COS rising edge.
    Keyed,

    /// The node was unkeyed.
    Unkeyed(UnkeyReason),

    /// Network presence changed.  `address` is empty when disconnected.
    NetworkChanged { connected: bool, address: Address },

    /// The shutdown button was held past the activate count.
    ShutdownRequested { held_ticks: u32 },

    /// Grace period elapsed; power-off is being invoked.
    PoweringOff,

    /// An external command failed to start or exited non-zero.
    CommandFailed(CommandError),

    /// A pin read or write failed during a tick.
    PinFault(GpioError),
}

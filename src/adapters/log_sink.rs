//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing monitor events through the `log`
//! facade (rendered by the tracing subscriber installed in `main`).

use log::{info, warn};

use crate::app::events::MonitorEvent;
use crate::app::ports::EventSink;
use crate::monitor::UnkeyReason;

/// Adapter that logs every [`MonitorEvent`] to the console / journal.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &MonitorEvent) {
        match event {
            MonitorEvent::Started { cos_active } => {
                info!("START | COSmon running, COS={}", if *cos_active { "active" } else { "idle" });
            }
            MonitorEvent::Keyed => info!("COS | keyed"),
            MonitorEvent::Unkeyed(UnkeyReason::Released) => info!("COS | unkeyed"),
            MonitorEvent::Unkeyed(UnkeyReason::TimedOut) => warn!("COS | unkeyed (timeout)"),
            MonitorEvent::NetworkChanged { connected: true, address } => {
                info!("NET | connected ({})", address);
            }
            MonitorEvent::NetworkChanged { connected: false, .. } => {
                info!("NET | disconnected");
            }
            MonitorEvent::ShutdownRequested { held_ticks } => {
                warn!("SHUTDOWN | button held {} ticks, shutting down!", held_ticks);
            }
            MonitorEvent::PoweringOff => warn!("SHUTDOWN | powering off"),
            MonitorEvent::CommandFailed(e) => warn!("CMD | {}", e),
            MonitorEvent::PinFault(e) => warn!("GPIO | {}", e),
        }
    }
}

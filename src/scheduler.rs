//! Fixed-period polling scheduler.
//!
//! Owns the three monitor state owners and drives them once per tick.
//! All I/O flows through port traits passed in at each call site.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         one tick                             │
//! │                                                              │
//! │  GpioPort.read_cos() ───────▶ CosWatchdog ──▶ key / unkey    │
//! │  GpioPort.read_shutdown() ──▶ ShutdownDebouncer ──▶ shutdown │
//! │  ConnectivityProbe ─────────▶ NetworkIndicator ──▶ LED pin   │
//! │                                                              │
//! │                  TimePort.sleep_ms(loop_delay)               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Cadence
//!
//! Commands run synchronously inside the tick, so a slow `asterisk -rx`
//! stretches that tick.  The period is `loop_delay + command time`, not a
//! fixed rate.
//!
//! ## Termination
//!
//! The shutdown sequence is terminal: once power-off has been invoked the
//! scheduler reports [`RunState::Terminated`] and never ticks again.

use log::{debug, info, warn};

use crate::app::events::MonitorEvent;
use crate::app::ports::{CommandError, CommandGateway, ConnectivityProbe, EventSink, GpioPort, TimePort};
use crate::config::{CosmonConfig, SHUTDOWN_GRACE_MS};
use crate::error::Result;
use crate::monitor::network::DISCONNECTED_LEVEL;
use crate::monitor::{
    CosIntent, CosWatchdog, NetworkIndicator, ShutdownDebouncer, ShutdownIntent, UnkeyReason,
};

// ═══════════════════════════════════════════════════════════════
//  Run state
// ═══════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    /// Power-off has been invoked.  Terminal.
    Terminated,
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler
// ═══════════════════════════════════════════════════════════════

pub struct Scheduler {
    watchdog: CosWatchdog,
    /// `None` when the shutdown switch is disabled.
    debouncer: Option<ShutdownDebouncer>,
    /// `None` when the network LED is disabled.
    indicator: Option<NetworkIndicator>,
    loop_delay_ms: u32,
    state: RunState,
    tick_count: u64,
}

impl Scheduler {
    /// Bring the outputs to a known state and build the state owners.
    ///
    /// Writes the LED to its off level, takes the first COS sample, and
    /// unkeys the node unconditionally.  Pin failures here are fatal; a
    /// failed unkey command is only reported.
    pub fn start(
        config: &CosmonConfig,
        gpio: &mut impl GpioPort,
        gateway: &mut impl CommandGateway,
        sink: &mut impl EventSink,
    ) -> Result<Self> {
        gpio.write_network_led(DISCONNECTED_LEVEL)?;
        let cos_active = gpio.read_cos()?;

        let watchdog = CosWatchdog::new(
            cos_active,
            config.timeout_ticks(),
            config.cos_timeout_enabled,
        );
        let debouncer = config
            .shutdown_enabled
            .then(|| ShutdownDebouncer::new(config.shutdown_activate_count));
        let indicator = config
            .network_indicator_enabled
            .then(|| NetworkIndicator::new(config.network_check_divisor));

        report(gateway.unkey(), sink);
        sink.emit(&MonitorEvent::Started { cos_active });
        info!(
            "Scheduler: started (COS {}, timeout {} ticks)",
            if cos_active { "active" } else { "idle" },
            config.timeout_ticks()
        );

        Ok(Self {
            watchdog,
            debouncer,
            indicator,
            loop_delay_ms: config.loop_delay_ms,
            state: RunState::Running,
            tick_count: 0,
        })
    }

    /// Run one poll cycle without sleeping.
    pub fn tick(
        &mut self,
        gpio: &mut impl GpioPort,
        gateway: &mut impl CommandGateway,
        probe: &mut impl ConnectivityProbe,
        time: &mut impl TimePort,
        sink: &mut impl EventSink,
    ) -> RunState {
        if self.state == RunState::Terminated {
            return self.state;
        }
        self.tick_count += 1;

        // 1. COS edge + watchdog
        match gpio.read_cos() {
            Ok(level) => {
                if let Some(intent) = self.watchdog.on_sample(level) {
                    self.execute_cos(intent, gateway, sink);
                }
            }
            Err(e) => {
                warn!("Scheduler: COS sample skipped on tick {}", self.tick_count);
                sink.emit(&MonitorEvent::PinFault(e));
            }
        }

        // 2. Shutdown button
        if let Some(debouncer) = self.debouncer.as_mut() {
            match gpio.read_shutdown_pressed() {
                Ok(pressed) => {
                    if let Some(intent) = debouncer.on_sample(pressed) {
                        self.shutdown_sequence(intent, gpio, gateway, time, sink);
                        return self.state;
                    }
                }
                Err(e) => sink.emit(&MonitorEvent::PinFault(e)),
            }
        }

        // 3. Network LED
        if let Some(indicator) = self.indicator.as_mut() {
            if let Some(change) = indicator.on_tick(probe) {
                if let Err(e) = gpio.write_network_led(change.level) {
                    sink.emit(&MonitorEvent::PinFault(e));
                }
                sink.emit(&MonitorEvent::NetworkChanged {
                    connected: change.connected,
                    address: change.address,
                });
            }
        }

        self.state
    }

    /// Tick, sleep, repeat until the shutdown sequence terminates the loop.
    pub fn run(
        &mut self,
        gpio: &mut impl GpioPort,
        gateway: &mut impl CommandGateway,
        probe: &mut impl ConnectivityProbe,
        time: &mut impl TimePort,
        sink: &mut impl EventSink,
    ) -> RunState {
        info!("Scheduler: polling every {} ms", self.loop_delay_ms);
        while self.tick(gpio, gateway, probe, time, sink) == RunState::Running {
            time.sleep_ms(self.loop_delay_ms);
        }
        self.state
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Ticks executed since start-up.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn watchdog(&self) -> &CosWatchdog {
        &self.watchdog
    }

    pub fn debouncer(&self) -> Option<&ShutdownDebouncer> {
        self.debouncer.as_ref()
    }

    pub fn indicator(&self) -> Option<&NetworkIndicator> {
        self.indicator.as_ref()
    }

    // ── Internal ──────────────────────────────────────────────

    fn execute_cos(
        &self,
        intent: CosIntent,
        gateway: &mut impl CommandGateway,
        sink: &mut impl EventSink,
    ) {
        match intent {
            CosIntent::Key => {
                report(gateway.key(), sink);
                sink.emit(&MonitorEvent::Keyed);
            }
            CosIntent::Unkey(reason) => {
                if reason == UnkeyReason::TimedOut {
                    warn!("Scheduler: COS stuck active, forcing unkey");
                }
                report(gateway.unkey(), sink);
                sink.emit(&MonitorEvent::Unkeyed(reason));
            }
        }
    }

    fn shutdown_sequence(
        &mut self,
        intent: ShutdownIntent,
        gpio: &mut impl GpioPort,
        gateway: &mut impl CommandGateway,
        time: &mut impl TimePort,
        sink: &mut impl EventSink,
    ) {
        sink.emit(&MonitorEvent::ShutdownRequested {
            held_ticks: intent.held_ticks,
        });

        // LED off acknowledges the press.
        if let Err(e) = gpio.write_network_led(DISCONNECTED_LEVEL) {
            sink.emit(&MonitorEvent::PinFault(e));
        }
        report(gateway.shutdown(), sink);

        debug!("Scheduler: waiting {} ms before power-off", SHUTDOWN_GRACE_MS);
        time.sleep_ms(SHUTDOWN_GRACE_MS);

        sink.emit(&MonitorEvent::PoweringOff);
        report(gateway.power_off(), sink);
        self.state = RunState::Terminated;
    }
}

/// Commands are fire-and-forget; a failure is only surfaced as an event.
fn report(result: core::result::Result<(), CommandError>, sink: &mut impl EventSink) {
    if let Err(e) = result {
        sink.emit(&MonitorEvent::CommandFailed(e));
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════

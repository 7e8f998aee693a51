//! COSmon — Main Entry Point
//!
//! Watches a radio's carrier-operated switch on the Raspberry Pi GPIO header
//! and keys/unkeys the local AllStar node through `asterisk -rx`.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  GpioBoard (gpiod)   ShellGateway   RouteProbe   SystemClock   │
//! │  (GpioPort)          (Commands)     (Network)    (TimePort)    │
//! │  IniConfigAdapter    LogEventSink                              │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │                 Scheduler (pure logic)                 │    │
//! │  │  CosWatchdog · ShutdownDebouncer · NetworkIndicator    │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cosmon::adapters::ini_config::IniConfigAdapter;
use cosmon::app::ports::ConfigPort;
use cosmon::config::CosmonConfig;

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("COSmon version v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Config (defaults on any failure) ───────────────────
    let adapter = IniConfigAdapter::default();
    let config = match adapter.load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("{} ({}), running with defaults", adapter.path().display(), e);
            CosmonConfig::default()
        }
    };

    // ── 3. Asterisk must already be up ────────────────────────
    if !std::path::Path::new(&config.control_socket).exists() {
        error!(
            "Asterisk needs to be running first! ({} missing) Exiting",
            config.control_socket
        );
        return Err(cosmon::error::Error::Precondition("Asterisk is not running").into());
    }

    log_config(&config);
    run(&config)
}

#[cfg(target_os = "linux")]
fn run(config: &CosmonConfig) -> Result<()> {
    use anyhow::Context;
    use cosmon::adapters::log_sink::LogEventSink;
    use cosmon::adapters::net_probe::RouteProbe;
    use cosmon::adapters::shell::ShellGateway;
    use cosmon::adapters::time::SystemClock;
    use cosmon::drivers::gpiod;
    use cosmon::scheduler::Scheduler;

    // ── 4. Hardware ───────────────────────────────────────────
    let mut board = gpiod::open_board(config).context("GPIO setup failed")?;

    // ── 5. Adapters ───────────────────────────────────────────
    let mut gateway = ShellGateway::new(config.commands.clone());
    let mut probe = RouteProbe::new();
    let mut clock = SystemClock::new();
    let mut sink = LogEventSink::new();

    // ── 6. Known state, then poll forever ─────────────────────
    let mut scheduler = Scheduler::start(config, &mut board, &mut gateway, &mut sink)
        .context("start-up failed")?;

    let state = scheduler.run(&mut board, &mut gateway, &mut probe, &mut clock, &mut sink);
    info!(
        "COSmon {:?} after {} ticks ({} s)",
        state,
        scheduler.tick_count(),
        clock.uptime_secs()
    );
    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn run(_config: &CosmonConfig) -> Result<()> {
    anyhow::bail!("COSmon needs the Linux GPIO character device")
}

fn log_config(c: &CosmonConfig) {
    let on_off = |b: bool| if b { "ENABLED" } else { "DISABLED" };

    info!("Config:");
    info!("  COS GPIO number: {}", c.cos_pin);
    if c.cos_timeout_enabled {
        info!("  COS timeout (ms): {}", c.cos_timeout_ms);
    } else {
        info!("  COS timeout disabled");
    }
    info!("  COS check loop delay (ms): {}", c.loop_delay_ms);
    info!("  Shutdown switch: {}", on_off(c.shutdown_enabled));
    info!("  Network connected indicator: {}", on_off(c.network_indicator_enabled));
    info!("  Network status GPIO number: {}", c.network_pin);
    info!("  Shutdown switch GPIO number: {}", c.shutdown_pin);
    info!("  Shutdown switch activate count: {}", c.shutdown_activate_count);
    info!("  Network check divisor: {}", c.network_check_divisor);
    info!("  GPIO chip: {}", c.gpio_chip);
}

//! System configuration parameters
//!
//! All tunable parameters for one COSmon run.  Loaded once at start-up from
//! `/etc/COSmon.conf` (see [`IniConfigAdapter`](crate::adapters::ini_config::IniConfigAdapter))
//! and never mutated afterwards.

use log::warn;

use crate::pins;

/// Fixed location of the configuration file.
pub const CONFIG_PATH: &str = "/etc/COSmon.conf";

/// Control socket that proves Asterisk is running.
pub const DEFAULT_CONTROL_SOCKET: &str = "/var/run/asterisk.ctl";

/// Delay between the shutdown script and the power-off command.
pub const SHUTDOWN_GRACE_MS: u32 = 5000;

/// External command lines run through the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSet {
    /// Tells the AllStar node the receiver has carrier (transmit).
    pub key: String,
    /// Tells the AllStar node carrier has dropped.
    pub unkey: String,
    /// Stops Asterisk cleanly before power-off.
    pub shutdown_script: String,
    /// Halts the host.
    pub poweroff: String,
}

impl Default for CommandSet {
    fn default() -> Self {
        Self {
            key: r#"asterisk -rx "susb tune menu-support K""#.into(),
            unkey: r#"asterisk -rx "susb tune menu-support k""#.into(),
            shutdown_script: "/usr/local/sbin/astdn.sh".into(),
            poweroff: "/usr/bin/poweroff".into(),
        }
    }
}

/// Core daemon configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CosmonConfig {
    // --- GPIO (wiringPi numbering) ---
    /// Carrier-operated switch input
    pub cos_pin: u16,
    /// Network status LED output
    pub network_pin: u16,
    /// Shutdown push-button input
    pub shutdown_pin: u16,
    /// GPIO character device name under /dev
    pub gpio_chip: String,

    // --- Functions ---
    /// Drive the network status LED
    pub network_indicator_enabled: bool,
    /// Honour the shutdown push-button
    pub shutdown_enabled: bool,

    // --- COS settings ---
    /// Poll loop period (milliseconds)
    pub loop_delay_ms: u32,
    /// Force an unkey after COS has been active this long (milliseconds)
    pub cos_timeout_ms: u32,
    /// Enable the stuck-COS watchdog
    pub cos_timeout_enabled: bool,
    /// Check connectivity every N loop ticks
    pub network_check_divisor: u32,
    /// Consecutive pressed ticks required before shutdown
    pub shutdown_activate_count: u32,

    // --- Integration ---
    pub commands: CommandSet,
    /// Path whose existence proves the control service is up
    pub control_socket: String,
}

impl Default for CosmonConfig {
    fn default() -> Self {
        Self {
            cos_pin: pins::DEFAULT_COS_PIN,
            network_pin: pins::DEFAULT_NETWORK_PIN,
            shutdown_pin: pins::DEFAULT_SHUTDOWN_PIN,
            gpio_chip: pins::DEFAULT_GPIO_CHIP.into(),

            network_indicator_enabled: false,
            shutdown_enabled: false,

            loop_delay_ms: 100,       // 10 Hz
            cos_timeout_ms: 150_000,  // 2.5 min
            cos_timeout_enabled: true,
            network_check_divisor: 20, // every 2 s at 10 Hz
            shutdown_activate_count: 30, // 3 s hold at 10 Hz

            commands: CommandSet::default(),
            control_socket: DEFAULT_CONTROL_SOCKET.into(),
        }
    }
}

impl CosmonConfig {
    /// Watchdog budget in loop ticks: `cos_timeout_ms / loop_delay_ms`,
    /// rounded half-up.
    pub fn timeout_ticks(&self) -> u32 {
        let ms = u64::from(self.cos_timeout_ms);
        let delay = u64::from(self.loop_delay_ms.max(1));
        let ticks = (2 * ms + delay) / (2 * delay);
        u32::try_from(ticks).unwrap_or(u32::MAX)
    }

    /// Replace out-of-range values with their defaults.
    ///
    /// A zero loop delay or divisor would spin or divide by zero, and a pin
    /// outside the wiringPi whitelist has no line to request.
    pub fn sanitised(mut self) -> Self {
        let d = Self::default();

        for (name, pin, default) in [
            ("gpio_COS", &mut self.cos_pin, d.cos_pin),
            ("gpio_network", &mut self.network_pin, d.network_pin),
            ("gpio_shutdown", &mut self.shutdown_pin, d.shutdown_pin),
        ] {
            if !pins::is_allowed(*pin) {
                warn!("Config: {} = {} is not an allowed pin, using {}", name, pin, default);
                *pin = default;
            }
        }

        if self.loop_delay_ms == 0 {
            warn!("Config: COS_poll_loop_interval_ms must be > 0, using {}", d.loop_delay_ms);
            self.loop_delay_ms = d.loop_delay_ms;
        }
        if self.network_check_divisor == 0 {
            warn!(
                "Config: network_check_divisor must be > 0, using {}",
                d.network_check_divisor
            );
            self.network_check_divisor = d.network_check_divisor;
        }
        if self.gpio_chip.trim().is_empty() {
            self.gpio_chip = d.gpio_chip;
        }
        self
    }
}

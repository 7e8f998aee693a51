//! Port traits — the hexagonal boundary between the monitor core and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Scheduler (domain)
//! ```
//!
//! Driven adapters (GPIO, shell, network probe, clock, event sink, config
//! file) implement these traits.  The [`Scheduler`](crate::scheduler::Scheduler)
//! consumes them via generics at each call site, so the core never touches
//! hardware or spawns processes directly.

use embedded_hal::digital::PinState;

use crate::config::CosmonConfig;
use crate::error::GpioError;

// ───────────────────────────────────────────────────────────────
// GPIO port (driven adapter: pins ↔ domain)
// ───────────────────────────────────────────────────────────────

/// The three pins the monitor uses, already normalised to domain meaning.
pub trait GpioPort {
    /// `true` while the radio asserts carrier (COS pin HIGH).
    fn read_cos(&mut self) -> Result<bool, GpioError>;

    /// `true` while the shutdown button is held (pin pulled LOW).
    fn read_shutdown_pressed(&mut self) -> Result<bool, GpioError>;

    /// Drive the network status LED pin to `level`.
    fn write_network_led(&mut self, level: PinState) -> Result<(), GpioError>;
}

// ───────────────────────────────────────────────────────────────
// Command gateway (driven adapter: domain → Asterisk / OS)
// ───────────────────────────────────────────────────────────────

/// Control-plane commands toward the radio application and the host.
///
/// Every call is synchronous and blocks until the command exits.  Output is
/// discarded; the error only exists so the caller can log it.
pub trait CommandGateway {
    /// Key the node (carrier present).
    fn key(&mut self) -> Result<(), CommandError>;

    /// Unkey the node (carrier gone or timed out).
    fn unkey(&mut self) -> Result<(), CommandError>;

    /// Run the shutdown script that stops the radio application.
    fn shutdown(&mut self) -> Result<(), CommandError>;

    /// Power the host off.  Terminal on real hardware.
    fn power_off(&mut self) -> Result<(), CommandError>;
}

// ───────────────────────────────────────────────────────────────
// Connectivity probe (driven adapter: network → domain)
// ───────────────────────────────────────────────────────────────

/// Room for the longest textual IPv6 address (`INET6_ADDRSTRLEN`).
pub const ADDRESS_CAPACITY: usize = 46;

/// Textual host address.  Empty means no connectivity.
pub type Address = heapless::String<ADDRESS_CAPACITY>;

pub trait ConnectivityProbe {
    /// Current primary address of the host, or an empty string.
    fn current_address(&mut self) -> Address;
}

// ───────────────────────────────────────────────────────────────
// Time port
// ───────────────────────────────────────────────────────────────

/// Blocking delays.  The only suspension points of the polling loop.
pub trait TimePort {
    fn sleep_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The scheduler emits structured [`MonitorEvent`](super::events::MonitorEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::MonitorEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: file → domain)
// ───────────────────────────────────────────────────────────────

/// Loads the run configuration.
///
/// Implementations resolve each field independently: a missing or
/// malformed value takes its default and never fails the whole load.
/// `Err` is reserved for the source itself being unavailable.
pub trait ConfigPort {
    fn load(&self) -> Result<CosmonConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration file does not exist.
    NotFound,
    /// The file exists but could not be read or parsed.
    Unreadable(String),
}

/// Errors from [`CommandGateway`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The shell could not be started.
    Spawn { command: String, reason: String },
    /// The command ran and reported failure.  `None` if killed by a signal.
    Failed { command: String, code: Option<i32> },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Unreadable(msg) => write!(f, "config unreadable: {}", msg),
        }
    }
}

impl core::fmt::Display for CommandError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spawn { command, reason } => write!(f, "'{}' could not start: {}", command, reason),
            Self::Failed { command, code: Some(code) } => {
                write!(f, "'{}' exited with status {}", command, code)
            }
            Self::Failed { command, code: None } => {
                write!(f, "'{}' terminated by signal", command)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for CommandError {}

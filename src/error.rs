//! Unified error types for the COSmon daemon.
//!
//! A single `Error` enum that every subsystem converts into, so the start-up
//! path in `main` handles failures uniformly.  Steady-state faults inside the
//! polling loop never surface here; the scheduler logs them and moves on.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level daemon error
// ---------------------------------------------------------------------------

/// Every fallible start-up operation funnels into this type.
#[derive(Debug)]
pub enum Error {
    /// GPIO chip/line setup or a start-up pin access failed.
    Gpio(GpioError),
    /// A required external service is not running.
    Precondition(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpio(e) => write!(f, "gpio: {e}"),
            Self::Precondition(msg) => write!(f, "precondition: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// GPIO errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GpioError {
    /// The GPIO character device could not be opened.
    ChipOpenFailed(String),
    /// A line request (direction, bias, consumer) was rejected.
    LineRequestFailed { line: u32, reason: String },
    /// Reading an input line failed.
    ReadFailed(&'static str),
    /// Writing an output line failed.
    WriteFailed(&'static str),
    /// The configured pin number has no BCM mapping.
    UnknownPin(u16),
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ChipOpenFailed(chip) => write!(f, "cannot open GPIO chip '{chip}'"),
            Self::LineRequestFailed { line, reason } => {
                write!(f, "line {line} request failed: {reason}")
            }
            Self::ReadFailed(pin) => write!(f, "{pin} read failed"),
            Self::WriteFailed(pin) => write!(f, "{pin} write failed"),
            Self::UnknownPin(pin) => write!(f, "wiringPi pin {pin} has no BCM mapping"),
        }
    }
}

impl std::error::Error for GpioError {}

impl From<GpioError> for Error {
    fn from(e: GpioError) -> Self {
        Self::Gpio(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

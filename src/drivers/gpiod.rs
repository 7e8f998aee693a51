//! Linux GPIO character-device driver.
//!
//! Requests the three monitor lines from `/dev/gpiochipN` through
//! `async_gpiod` and exposes them as blocking `embedded-hal` pins.  Each
//! line access is a single ioctl, so the futures are driven to completion
//! in place with `futures_lite::future::block_on`.
//!
//! ## Line setup
//!
//! | Role      | Direction | Bias     | Initial |
//! |-----------|-----------|----------|---------|
//! | COS       | input     | as-is    | —       |
//! | Shutdown  | input     | pull-up  | —       |
//! | LED       | output    | —        | HIGH    |

use async_gpiod::{Bias, Chip, Input, LineId, Lines, Options, Output};
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};
use futures_lite::future::block_on;
use log::info;

use crate::adapters::gpio_board::GpioBoard;
use crate::config::CosmonConfig;
use crate::error::GpioError;
use crate::pins;

const CONSUMER: &str = "cosmon";

/// I/O failure on an already-requested line.
#[derive(Debug)]
pub struct LineError(std::io::Error);

impl core::fmt::Display for LineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "line I/O failed: {}", self.0)
    }
}

impl std::error::Error for LineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl embedded_hal::digital::Error for LineError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

// ── Input line ────────────────────────────────────────────────

pub struct GpiodInput {
    line: Lines<Input>,
}

impl ErrorType for GpiodInput {
    type Error = LineError;
}

impl InputPin for GpiodInput {
    fn is_high(&mut self) -> Result<bool, LineError> {
        let [level] = block_on(self.line.get_values([false])).map_err(LineError)?;
        Ok(level)
    }

    fn is_low(&mut self) -> Result<bool, LineError> {
        self.is_high().map(|high| !high)
    }
}

// ── Output line ───────────────────────────────────────────────

pub struct GpiodOutput {
    line: Lines<Output>,
}

impl ErrorType for GpiodOutput {
    type Error = LineError;
}

impl OutputPin for GpiodOutput {
    fn set_low(&mut self) -> Result<(), LineError> {
        block_on(self.line.set_values([false])).map_err(LineError)
    }

    fn set_high(&mut self) -> Result<(), LineError> {
        block_on(self.line.set_values([true])).map_err(LineError)
    }
}

// ── Board setup ───────────────────────────────────────────────

pub type LinuxBoard = GpioBoard<GpiodInput, GpiodInput, GpiodOutput>;

/// Open the configured chip and request the COS, shutdown, and LED lines.
///
/// Any failure here is a hardware setup failure and is fatal to start-up.
pub fn open_board(config: &CosmonConfig) -> Result<LinuxBoard, GpioError> {
    let cos_line = bcm(config.cos_pin)?;
    let shutdown_line = bcm(config.shutdown_pin)?;
    let led_line = bcm(config.network_pin)?;

    block_on(async {
        let chip = Chip::new(&config.gpio_chip)
            .await
            .map_err(|e| GpioError::ChipOpenFailed(format!("{} ({})", config.gpio_chip, e)))?;

        let cos = chip
            .request_lines(Options::input([cos_line]).consumer(CONSUMER))
            .await
            .map_err(|e| request_failed(cos_line, &e))?;

        let shutdown = chip
            .request_lines(
                Options::input([shutdown_line])
                    .bias(Bias::PullUp)
                    .consumer(CONSUMER),
            )
            .await
            .map_err(|e| request_failed(shutdown_line, &e))?;

        let led = chip
            .request_lines(
                Options::output([led_line])
                    .values([true])
                    .consumer(CONSUMER),
            )
            .await
            .map_err(|e| request_failed(led_line, &e))?;

        info!(
            "gpiod: {} lines COS={} shutdown={} LED={}",
            config.gpio_chip, cos_line, shutdown_line, led_line
        );

        Ok(GpioBoard::new(
            GpiodInput { line: cos },
            GpiodInput { line: shutdown },
            GpiodOutput { line: led },
        ))
    })
}

fn bcm(pin: u16) -> Result<LineId, GpioError> {
    pins::bcm_line(pin).ok_or(GpioError::UnknownPin(pin))
}

fn request_failed(line: LineId, e: &std::io::Error) -> GpioError {
    GpioError::LineRequestFailed {
        line,
        reason: e.to_string(),
    }
}

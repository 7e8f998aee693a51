//! GPIO board adapter — bridges `embedded-hal` pins to [`GpioPort`].
//!
//! Owns the COS input, the shutdown input, and the network LED output, and
//! applies the board's electrical conventions so the domain only sees
//! meaning:
//!
//! | Pin       | Electrical           | Domain                      |
//! |-----------|----------------------|-----------------------------|
//! | COS       | HIGH = carrier       | `read_cos() == true`        |
//! | Shutdown  | LOW = pressed        | `read_shutdown_pressed()`   |
//! | LED       | HIGH = off           | `write_network_led(level)`  |

use embedded_hal::digital::{InputPin, OutputPin, PinState};
use log::debug;

use crate::app::ports::GpioPort;
use crate::error::GpioError;

pub struct GpioBoard<C, S, L> {
    cos: C,
    shutdown: S,
    network_led: L,
}

impl<C, S, L> GpioBoard<C, S, L>
where
    C: InputPin,
    S: InputPin,
    L: OutputPin,
{
    pub fn new(cos: C, shutdown: S, network_led: L) -> Self {
        Self {
            cos,
            shutdown,
            network_led,
        }
    }

    /// Give the pins back (tests inspect mock state this way).
    pub fn release(self) -> (C, S, L) {
        (self.cos, self.shutdown, self.network_led)
    }
}

impl<C, S, L> GpioPort for GpioBoard<C, S, L>
where
    C: InputPin,
    S: InputPin,
    L: OutputPin,
{
    fn read_cos(&mut self) -> Result<bool, GpioError> {
        self.cos.is_high().map_err(|e| {
            debug!("GpioBoard: COS read error {:?}", e);
            GpioError::ReadFailed("COS")
        })
    }

    fn read_shutdown_pressed(&mut self) -> Result<bool, GpioError> {
        self.shutdown.is_low().map_err(|e| {
            debug!("GpioBoard: shutdown read error {:?}", e);
            GpioError::ReadFailed("shutdown switch")
        })
    }

    fn write_network_led(&mut self, level: PinState) -> Result<(), GpioError> {
        self.network_led.set_state(level).map_err(|e| {
            debug!("GpioBoard: LED write error {:?}", e);
            GpioError::WriteFailed("network LED")
        })
    }
}

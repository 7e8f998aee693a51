//! Network presence indicator.
//!
//! Every `divisor` ticks the connectivity probe is asked for the host
//! address.  The LED pin is only written when presence flips, never on
//! every check.
//!
//! ## Polarity
//!
//! The LED is wired so that the pin idles HIGH (LED off).  HIGH therefore
//! means "disconnected" and LOW means "connected".

use embedded_hal::digital::PinState;

use crate::app::ports::{Address, ConnectivityProbe};

/// Pin level while no address is held (also the start-up level).
pub const DISCONNECTED_LEVEL: PinState = PinState::High;
/// Pin level while an address is held.
pub const CONNECTED_LEVEL: PinState = PinState::Low;

/// Pin level that signals `connected`.
pub fn level_for(connected: bool) -> PinState {
    if connected { CONNECTED_LEVEL } else { DISCONNECTED_LEVEL }
}

/// A presence transition the scheduler must write to the LED pin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkChange {
    pub connected: bool,
    pub level: PinState,
    pub address: Address,
}

pub struct NetworkIndicator {
    last_asserted: bool,
    tick_counter: u32,
    divisor: u32,
}

impl NetworkIndicator {
    /// `divisor` must be non-zero; a zero is treated as 1.
    pub fn new(divisor: u32) -> Self {
        Self {
            last_asserted: false,
            tick_counter: 0,
            divisor: divisor.max(1),
        }
    }

    /// Call once per scheduler tick.  Probes on ticks 0, N, 2N, ...
    pub fn on_tick(&mut self, probe: &mut impl ConnectivityProbe) -> Option<NetworkChange> {
        let due = self.tick_counter % self.divisor == 0;
        self.tick_counter = self.tick_counter.wrapping_add(1);
        if !due {
            return None;
        }

        let address = probe.current_address();
        let connected = !address.is_empty();
        if connected == self.last_asserted {
            return None;
        }

        self.last_asserted = connected;
        Some(NetworkChange {
            connected,
            level: level_for(connected),
            address,
        })
    }

    /// Whether the LED currently shows "connected".
    pub fn is_connected(&self) -> bool {
        self.last_asserted
    }
}

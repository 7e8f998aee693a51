//! GPIO pin assignments for the COSmon Raspberry Pi interface board.
//!
//! The configuration file speaks wiringPi pin numbers.  The Linux GPIO
//! character device speaks BCM line offsets.  This module is the single
//! place that translates between the two.

// ---------------------------------------------------------------------------
// Board defaults (wiringPi numbering)
// ---------------------------------------------------------------------------

/// Carrier-operated switch input from the radio.  Active HIGH.
/// wiringPi 29, BCM 21, header pin 40.
pub const DEFAULT_COS_PIN: u16 = 29;

/// Network status LED output.  HIGH = off, LOW = lit.
/// wiringPi 3, BCM 22, header pin 15.
pub const DEFAULT_NETWORK_PIN: u16 = 3;

/// Shutdown push-button input.  Active LOW, internal pull-up enabled.
/// wiringPi 7, BCM 4, header pin 7.
pub const DEFAULT_SHUTDOWN_PIN: u16 = 7;

/// GPIO character device that owns the 40-pin header lines.
pub const DEFAULT_GPIO_CHIP: &str = "gpiochip0";

// ---------------------------------------------------------------------------
// wiringPi → BCM translation
// ---------------------------------------------------------------------------

/// (wiringPi, BCM) pairs for the pins the daemon accepts.
///
/// Restricted to header pins that are free on the usual AllStar node
/// builds: wiringPi 0–7 and 21–29.  The SPI/I2C/UART pins are excluded.
const WPI_TO_BCM: [(u16, u32); 17] = [
    (0, 17),
    (1, 18),
    (2, 27),
    (3, 22),
    (4, 23),
    (5, 24),
    (6, 25),
    (7, 4),
    (21, 5),
    (22, 6),
    (23, 13),
    (24, 19),
    (25, 26),
    (26, 12),
    (27, 16),
    (28, 20),
    (29, 21),
];

/// Whether `pin` is a wiringPi number the daemon may drive or sample.
pub fn is_allowed(pin: u16) -> bool {
    WPI_TO_BCM.iter().any(|&(wpi, _)| wpi == pin)
}

/// BCM line offset for a wiringPi pin, or `None` if it is not allowed.
pub fn bcm_line(pin: u16) -> Option<u32> {
    WPI_TO_BCM
        .iter()
        .find(|&&(wpi, _)| wpi == pin)
        .map(|&(_, bcm)| bcm)
}

//! Hardware drivers.

#[cfg(target_os = "linux")]
pub mod gpiod;

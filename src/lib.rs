//! COSmon library.
//!
//! Exposes the monitor core, port traits, and host adapters for
//! integration testing.  Only the GPIO driver is Linux-specific and is
//! guarded by `#[cfg(target_os = "linux")]` inside [`drivers`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod monitor;
pub mod pins;
pub mod scheduler;

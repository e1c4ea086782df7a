//! Hardware driver implementations
//!
//! This crate drives the accessory over any [`nunchuk_hal::WireBus`]:
//!
//! - [`nunchuk::DeviceSession`] - connect, cyclic polling, error classification
//! - [`nunchuk::LevelShifter`] - enable pin of the bus level shifter
//! - [`bus::EmbeddedHalWire`] - `WireBus` over any `embedded-hal` I2C master
//! - [`diag::DefmtDiagnostics`] - diagnostics sink for defmt (feature `defmt`)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bus;
pub mod diag;
pub mod nunchuk;

#[cfg(test)]
pub(crate) mod mock;

pub use bus::EmbeddedHalWire;
pub use nunchuk::{DeviceSession, LevelShifter, ReadOutcome};

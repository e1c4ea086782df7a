//! Nunchuk accessory driver
//!
//! # Protocol
//!
//! The accessory answers at address 0x52. Writing 0x55 to register 0xF0 and
//! then 0x00 to register 0xFB switches it to unencrypted output. Each
//! sensor read writes the register pointer 0x00 and then requests 6 bytes.
//! See [`nunchuk_core::registers`] for the byte layout.

pub mod session;
pub mod shifter;

pub use session::{classify, DeviceSession, ReadOutcome, CONVERSION_DELAY_US, INIT_DELAY_MS};
pub use shifter::LevelShifter;

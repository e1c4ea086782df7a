//! Nunchuk Hardware Abstraction Layer
//!
//! This crate defines the minimal capabilities the Nunchuk driver needs from
//! the platform. Chip-specific code (or the `embedded-hal` adapter in
//! `nunchuk-drivers`) implements them, so the session logic runs unchanged on
//! any target and against in-memory fakes on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (nunchuk-firmware, etc.)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  nunchuk-drivers (DeviceSession)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  nunchuk-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::WireBus`] - Transaction-oriented two-wire bus master
//! - [`time::Clock`] - Millisecond time source

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;
pub mod time;

// Re-export key traits at crate root for convenience
pub use i2c::{ClockMode, CompletionCode, I2cConfig, WireBus};
pub use time::Clock;

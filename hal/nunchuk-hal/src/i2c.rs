//! I2C bus abstractions
//!
//! The Nunchuk driver talks to the bus in the buffered, transaction-oriented
//! style of the classic two-wire master API: open a transmission, queue bytes,
//! close it and receive a completion code; then request a number of bytes and
//! drain them one at a time.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of closing a write transmission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompletionCode {
    /// Transmission acknowledged
    Success,
    /// Queued data did not fit the transmit buffer
    DataTooLong,
    /// Address byte was not acknowledged
    NackOnAddress,
    /// A data byte was not acknowledged
    NackOnData,
    /// Any other bus error
    Other,
    /// Bus did not complete within the allowed time
    Timeout,
}

impl CompletionCode {
    /// Numeric code as reported by the classic two-wire master API
    pub const fn code(self) -> u8 {
        match self {
            CompletionCode::Success => 0,
            CompletionCode::DataTooLong => 1,
            CompletionCode::NackOnAddress => 2,
            CompletionCode::NackOnData => 3,
            CompletionCode::Other => 4,
            CompletionCode::Timeout => 5,
        }
    }

    /// Check if the transmission succeeded
    pub const fn is_success(self) -> bool {
        matches!(self, CompletionCode::Success)
    }
}

/// Transaction-oriented I2C bus master
///
/// Writes are buffered between [`begin_transmission`](WireBus::begin_transmission)
/// and [`end_transmission`](WireBus::end_transmission); reads are fetched
/// in one go by [`request_from`](WireBus::request_from) and then drained
/// with [`read`](WireBus::read).
pub trait WireBus {
    /// Start queueing a write to the device at `address` (7-bit)
    fn begin_transmission(&mut self, address: u8);

    /// Queue one byte for the open transmission
    ///
    /// Returns `false` if the byte could not be queued.
    fn write(&mut self, byte: u8) -> bool;

    /// Send the queued bytes
    ///
    /// With `send_stop == false` the bus is kept for a repeated start by the
    /// next request.
    fn end_transmission(&mut self, send_stop: bool) -> CompletionCode;

    /// Read up to `count` bytes from the device at `address`
    ///
    /// Returns the number of bytes actually received, which may be less
    /// than requested (zero on failure).
    fn request_from(&mut self, address: u8, count: usize) -> usize;

    /// Number of received bytes not yet consumed by [`read`](WireBus::read)
    fn available(&self) -> usize;

    /// Take the next received byte
    fn read(&mut self) -> Option<u8>;

    /// Write a complete byte sequence as one transmission
    fn transmit(&mut self, address: u8, data: &[u8]) -> CompletionCode {
        self.begin_transmission(address);
        for &byte in data {
            if !self.write(byte) {
                // Close the transmission so the bus is not left half-open
                let _ = self.end_transmission(true);
                return CompletionCode::DataTooLong;
            }
        }
        self.end_transmission(true)
    }
}

/// Bus clock frequencies supported by the accessory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClockMode {
    /// Standard mode (100 kHz)
    Standard100kHz,
    /// Fast mode (400 kHz)
    #[default]
    Fast400kHz,
}

impl ClockMode {
    /// Clock frequency in Hz
    pub const fn frequency(self) -> u32 {
        match self {
            ClockMode::Standard100kHz => 100_000,
            ClockMode::Fast400kHz => 400_000,
        }
    }
}

/// I2C configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2cConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::from(ClockMode::default())
    }
}

impl From<ClockMode> for I2cConfig {
    fn from(mode: ClockMode) -> Self {
        Self {
            frequency: mode.frequency(),
        }
    }
}

impl I2cConfig {
    /// Standard mode (100 kHz)
    pub const STANDARD: Self = Self { frequency: 100_000 };

    /// Fast mode (400 kHz)
    pub const FAST: Self = Self { frequency: 400_000 };
}

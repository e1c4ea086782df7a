//! Session configuration
//!
//! Plain data, constructible in `const` context so firmware can bake a
//! validated configuration into the binary.

use nunchuk_hal::ClockMode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::calibration::Calibration;
use crate::diag::Verbosity;
use crate::input::DEFAULT_CONFIRM_WINDOW_MS;
use crate::registers::DEFAULT_ADDRESS;

/// Default minimum spacing between bus reads
pub const DEFAULT_CYCLE_INTERVAL_MS: u32 = 30;

/// Default number of connect attempts per read
pub const DEFAULT_CONNECT_ATTEMPTS: u8 = 3;

/// Upper bound on connect attempts per read
pub const MAX_CONNECT_ATTEMPTS: u8 = 10;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Address does not fit in 7 bits
    InvalidAddress,
    /// Connect attempts outside 1..=MAX_CONNECT_ATTEMPTS
    InvalidConnectAttempts,
    /// Acceleration neutral point above 10 bits
    InvalidCalibration,
}

/// Device session configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// 7-bit bus address
    pub address: u8,
    /// Minimum time between two bus reads (ms)
    pub cycle_interval_ms: u32,
    /// Debounce window of button C (ms)
    pub button_c_window_ms: u32,
    /// Debounce window of button Z (ms)
    pub button_z_window_ms: u32,
    /// Connect attempts made by one read before giving up
    pub connect_attempts: u8,
    /// Bus clock
    pub clock: ClockMode,
    /// Diagnostics filter
    pub verbosity: Verbosity,
    /// Neutral points used for decoding
    pub calibration: Calibration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl SessionConfig {
    /// Defaults: address 0x52, 30 ms cycle, 30 ms debounce, 3 attempts, 400 kHz
    pub const DEFAULT: Self = Self {
        address: DEFAULT_ADDRESS,
        cycle_interval_ms: DEFAULT_CYCLE_INTERVAL_MS,
        button_c_window_ms: DEFAULT_CONFIRM_WINDOW_MS,
        button_z_window_ms: DEFAULT_CONFIRM_WINDOW_MS,
        connect_attempts: DEFAULT_CONNECT_ATTEMPTS,
        clock: ClockMode::Fast400kHz,
        verbosity: Verbosity::Info,
        calibration: Calibration::DEFAULT,
    };

    /// Same debounce window for both buttons
    pub const fn new(button_window_ms: u32) -> Self {
        Self::DEFAULT.with_button_windows(button_window_ms, button_window_ms)
    }

    /// Separate debounce windows for C and Z
    pub const fn with_button_windows(mut self, c_ms: u32, z_ms: u32) -> Self {
        self.button_c_window_ms = c_ms;
        self.button_z_window_ms = z_ms;
        self
    }

    pub const fn with_cycle_interval_ms(mut self, interval_ms: u32) -> Self {
        self.cycle_interval_ms = interval_ms;
        self
    }

    pub const fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    pub const fn with_connect_attempts(mut self, attempts: u8) -> Self {
        self.connect_attempts = attempts;
        self
    }

    pub const fn with_clock(mut self, clock: ClockMode) -> Self {
        self.clock = clock;
        self
    }

    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub const fn with_calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = calibration;
        self
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.address > 0x7F {
            return Err(ConfigError::InvalidAddress);
        }

        if self.connect_attempts == 0 || self.connect_attempts > MAX_CONNECT_ATTEMPTS {
            return Err(ConfigError::InvalidConnectAttempts);
        }

        if !self.calibration.is_in_range() {
            return Err(ConfigError::InvalidCalibration);
        }

        Ok(())
    }
}

//! Neutral-point calibration
//!
//! The decoder subtracts these values from the raw fields. Defaults match a
//! typical accessory at rest; a device's own factory block can be read from
//! register 0x20 and parsed with [`Calibration::from_block`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::registers::CAL_DATA_LEN;
use crate::state::ErrorKind;

/// Checksum seed of the first trailing calibration byte
const CHECKSUM_SEED_1: u8 = 0x55;

/// Checksum seed of the second trailing calibration byte
const CHECKSUM_SEED_2: u8 = 0xAA;

/// Largest 10-bit acceleration value
pub const ACCEL_MAX: u16 = 0x3FF;

/// Neutral points of every axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Calibration {
    /// Joystick X center (raw byte)
    pub joystick_x_neutral: u8,
    /// Joystick Y center (raw byte)
    pub joystick_y_neutral: u8,
    /// Acceleration X at rest (10-bit)
    pub accel_x_neutral: u16,
    /// Acceleration Y at rest (10-bit)
    pub accel_y_neutral: u16,
    /// Acceleration Z at rest (10-bit)
    pub accel_z_neutral: u16,
}

impl Default for Calibration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Calibration {
    /// Nominal neutral points
    pub const DEFAULT: Self = Self {
        joystick_x_neutral: 0x7D,
        joystick_y_neutral: 0x7E,
        accel_x_neutral: 512,
        accel_y_neutral: 512,
        accel_z_neutral: 512,
    };

    /// Check that every acceleration neutral fits in 10 bits
    pub fn is_in_range(&self) -> bool {
        [self.accel_x_neutral, self.accel_y_neutral, self.accel_z_neutral]
            .iter()
            .all(|&neutral| neutral <= ACCEL_MAX)
    }

    /// Parse the 16-byte factory calibration block
    ///
    /// Block layout: bytes 0-2 are the zero-g acceleration values (8 high
    /// bits), bytes 10 and 13 the joystick centers, bytes 14-15 the
    /// checksum.
    ///
    /// Returns `BadValue` on checksum mismatch.
    pub fn from_block(block: &[u8; CAL_DATA_LEN]) -> Result<Self, ErrorKind> {
        let sum = block[..14]
            .iter()
            .fold(0u8, |acc, &byte| acc.wrapping_add(byte));

        if block[14] != sum.wrapping_add(CHECKSUM_SEED_1)
            || block[15] != sum.wrapping_add(CHECKSUM_SEED_2)
        {
            return Err(ErrorKind::BadValue);
        }

        Ok(Self {
            joystick_x_neutral: block[10],
            joystick_y_neutral: block[13],
            accel_x_neutral: (block[0] as u16) << 2,
            accel_y_neutral: (block[1] as u16) << 2,
            accel_z_neutral: (block[2] as u16) << 2,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_check() {
        assert!(Calibration::DEFAULT.is_in_range());

        let cal = Calibration {
            accel_y_neutral: ACCEL_MAX + 1,
            ..Calibration::DEFAULT
        };
        assert!(!cal.is_in_range());
    }

    fn with_checksum(mut block: [u8; CAL_DATA_LEN]) -> [u8; CAL_DATA_LEN] {
        let sum = block[..14].iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
        block[14] = sum.wrapping_add(0x55);
        block[15] = sum.wrapping_add(0xAA);
        block
    }

    #[test]
    fn test_default_neutral_points() {
        let cal = Calibration::default();
        assert_eq!(cal.joystick_x_neutral, 0x7D);
        assert_eq!(cal.joystick_y_neutral, 0x7E);
        assert_eq!(cal.accel_z_neutral, 512);
    }

    #[test]
    fn test_parse_block() {
        let block = with_checksum([
            0x81, 0x7F, 0x80, 0x00, 0xB3, 0xB1, 0xB2, 0x00, 0xE0, 0x20, 0x80, 0xE1, 0x1E, 0x81,
            0, 0,
        ]);

        let cal = Calibration::from_block(&block).unwrap();
        assert_eq!(cal.accel_x_neutral, 0x81 << 2);
        assert_eq!(cal.accel_y_neutral, 0x7F << 2);
        assert_eq!(cal.accel_z_neutral, 512);
        assert_eq!(cal.joystick_x_neutral, 0x80);
        assert_eq!(cal.joystick_y_neutral, 0x81);
    }

    #[test]
    fn test_checksum_mismatch() {
        let mut block = with_checksum([0x80; CAL_DATA_LEN]);
        block[15] ^= 0x01;
        assert_eq!(Calibration::from_block(&block), Err(ErrorKind::BadValue));
    }

    #[test]
    fn test_blank_block_rejected() {
        assert_eq!(
            Calibration::from_block(&[0xFF; CAL_DATA_LEN]),
            Err(ErrorKind::BadValue)
        );
    }
}

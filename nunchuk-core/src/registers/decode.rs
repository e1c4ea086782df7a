//! Stateless field extraction
//!
//! Every function accepts any image: accessory noise is valid input and
//! decoding never fails.

use super::{mask, RawRegisterImage};
use crate::config::Calibration;

/// Button C state (`true` = pressed)
pub fn button_c(raw: &RawRegisterImage) -> bool {
    raw.packed() & mask::BUTTON_C == 0
}

/// Button Z state (`true` = pressed)
pub fn button_z(raw: &RawRegisterImage) -> bool {
    raw.packed() & mask::BUTTON_Z == 0
}

/// Recombine a 10-bit axis and subtract its neutral point
fn acceleration(high: u8, packed: u8, low_mask: u8, neutral: u16) -> i16 {
    let low = (packed & low_mask) >> low_mask.trailing_zeros();
    let value = ((high as u16) << 2) | low as u16;
    // Neutral points come from user config and may lie outside 10 bits
    (i32::from(value) - i32::from(neutral)).clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

/// Acceleration X relative to neutral, in [-512, 511] with default calibration
pub fn acceleration_x(raw: &RawRegisterImage, cal: &Calibration) -> i16 {
    acceleration(raw.0[2], raw.packed(), mask::ACC_X_LOW, cal.accel_x_neutral)
}

/// Acceleration Y relative to neutral
pub fn acceleration_y(raw: &RawRegisterImage, cal: &Calibration) -> i16 {
    acceleration(raw.0[3], raw.packed(), mask::ACC_Y_LOW, cal.accel_y_neutral)
}

/// Acceleration Z relative to neutral
pub fn acceleration_z(raw: &RawRegisterImage, cal: &Calibration) -> i16 {
    acceleration(raw.0[4], raw.packed(), mask::ACC_Z_LOW, cal.accel_z_neutral)
}

/// Joystick X deflection from center
pub fn joystick_x(raw: &RawRegisterImage, cal: &Calibration) -> i16 {
    raw.0[0] as i16 - cal.joystick_x_neutral as i16
}

/// Joystick Y deflection from center
pub fn joystick_y(raw: &RawRegisterImage, cal: &Calibration) -> i16 {
    raw.0[1] as i16 - cal.joystick_y_neutral as i16
}

/// Every field of one image, decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    pub joystick_x: i16,
    pub joystick_y: i16,
    pub accel_x: i16,
    pub accel_y: i16,
    pub accel_z: i16,
    /// Undebounced button C
    pub button_c: bool,
    /// Undebounced button Z
    pub button_z: bool,
}

impl Reading {
    /// Decode all fields
    pub fn decode(raw: &RawRegisterImage, cal: &Calibration) -> Self {
        Self {
            joystick_x: joystick_x(raw, cal),
            joystick_y: joystick_y(raw, cal),
            accel_x: acceleration_x(raw, cal),
            accel_y: acceleration_y(raw, cal),
            accel_z: acceleration_z(raw, cal),
            button_c: button_c(raw),
            button_z: button_z(raw),
        }
    }
}

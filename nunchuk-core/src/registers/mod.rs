//! Accessory register map and raw images
//!
//! # Sensor register layout (6 bytes from register 0x00)
//!
//! | Byte | Content                                                  |
//! |------|----------------------------------------------------------|
//! | 0    | Joystick X                                               |
//! | 1    | Joystick Y                                               |
//! | 2    | Acceleration X, bits [9:2]                               |
//! | 3    | Acceleration Y, bits [9:2]                               |
//! | 4    | Acceleration Z, bits [9:2]                               |
//! | 5    | bit0 = !Z, bit1 = !C, [3:2] acc X, [5:4] acc Y, [7:6] acc Z bits [1:0] |

pub mod decode;

pub use decode::{
    acceleration_x, acceleration_y, acceleration_z, button_c, button_z, joystick_x, joystick_y,
    Reading,
};

/// Default 7-bit bus address of the accessory
pub const DEFAULT_ADDRESS: u8 = 0x52;

/// Length of the sensor register image
pub const RAW_DATA_LEN: usize = 6;

/// Length of the calibration block
pub const CAL_DATA_LEN: usize = 16;

/// Length of the identification block
pub const ID_LEN: usize = 6;

/// Register addresses
pub mod reg {
    /// Sensor data
    pub const RAW_DATA: u8 = 0x00;
    /// Calibration block
    pub const CAL_DATA: u8 = 0x20;
    /// First initialization register (unencrypted mode, step 1)
    pub const INIT_1: u8 = 0xF0;
    /// Second initialization register (unencrypted mode, step 2)
    pub const INIT_2: u8 = 0xFB;
    /// Identification block
    pub const ID: u8 = 0xFA;
}

/// Values written during initialization
pub mod init {
    /// Written to [`super::reg::INIT_1`]
    pub const INIT_1_VALUE: u8 = 0x55;
    /// Written to [`super::reg::INIT_2`]
    pub const INIT_2_VALUE: u8 = 0x00;
}

/// Bit masks of the packed byte 5
pub mod mask {
    /// Button Z, inverted (set = released)
    pub const BUTTON_Z: u8 = 0x01;
    /// Button C, inverted (set = released)
    pub const BUTTON_C: u8 = 0x02;
    /// Acceleration X bits [1:0]
    pub const ACC_X_LOW: u8 = 0x0C;
    /// Acceleration Y bits [1:0]
    pub const ACC_Y_LOW: u8 = 0x30;
    /// Acceleration Z bits [1:0]
    pub const ACC_Z_LOW: u8 = 0xC0;
}

/// The 6 bytes returned by one sensor read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawRegisterImage(pub [u8; RAW_DATA_LEN]);

impl RawRegisterImage {
    /// Image with every byte zero
    pub const ZERO: Self = Self([0; RAW_DATA_LEN]);

    /// Raw bytes
    pub const fn bytes(&self) -> &[u8; RAW_DATA_LEN] {
        &self.0
    }

    /// The packed flags byte
    pub const fn packed(&self) -> u8 {
        self.0[5]
    }
}

impl From<[u8; RAW_DATA_LEN]> for RawRegisterImage {
    fn from(bytes: [u8; RAW_DATA_LEN]) -> Self {
        Self(bytes)
    }
}

/// Identification block read from register 0xFA
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceId(pub [u8; ID_LEN]);

impl DeviceId {
    /// Extension type signature of the Nunchuk (bytes 2-5)
    pub const NUNCHUK_SIGNATURE: [u8; 4] = [0xA4, 0x20, 0x00, 0x00];

    /// Check the extension signature
    pub fn is_nunchuk(&self) -> bool {
        self.0[2..] == Self::NUNCHUK_SIGNATURE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_accessors() {
        let image = RawRegisterImage::from([1, 2, 3, 4, 5, 6]);
        assert_eq!(image.bytes(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(image.packed(), 6);
        assert_eq!(RawRegisterImage::default(), RawRegisterImage::ZERO);
    }

    #[test]
    fn test_masks_cover_packed_byte() {
        let all = mask::BUTTON_Z | mask::BUTTON_C | mask::ACC_X_LOW | mask::ACC_Y_LOW | mask::ACC_Z_LOW;
        assert_eq!(all, 0xFF);
    }

    #[test]
    fn test_device_id() {
        assert!(DeviceId([0x00, 0x00, 0xA4, 0x20, 0x00, 0x00]).is_nunchuk());
        // Classic controller signature
        assert!(!DeviceId([0x00, 0x00, 0xA4, 0x20, 0x01, 0x01]).is_nunchuk());
    }
}

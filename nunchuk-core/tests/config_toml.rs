//! Session configuration loaded from TOML
//!
//! Run with `cargo test -p nunchuk-core --features serde`.

#![cfg(feature = "serde")]

use nunchuk_core::{Calibration, SessionConfig, Verbosity};
use nunchuk_hal::ClockMode;

#[test]
fn test_partial_config_uses_defaults() {
    let config: SessionConfig = toml::from_str(
        r#"
        cycle_interval_ms = 20
        button_z_window_ms = 50
        verbosity = "verbose"
        "#,
    )
    .unwrap();

    assert_eq!(config.cycle_interval_ms, 20);
    assert_eq!(config.button_z_window_ms, 50);
    assert_eq!(config.button_c_window_ms, 30);
    assert_eq!(config.verbosity, Verbosity::Verbose);
    assert_eq!(config.address, 0x52);
    assert_eq!(config.calibration, Calibration::DEFAULT);
}

#[test]
fn test_full_config() {
    let config: SessionConfig = toml::from_str(
        r#"
        address = 82
        connect_attempts = 5
        clock = "Standard100kHz"

        [calibration]
        joystick_x_neutral = 128
        accel_z_neutral = 520
        "#,
    )
    .unwrap();

    assert_eq!(config.connect_attempts, 5);
    assert_eq!(config.clock, ClockMode::Standard100kHz);
    assert_eq!(config.calibration.joystick_x_neutral, 128);
    assert_eq!(config.calibration.joystick_y_neutral, 0x7E);
    assert_eq!(config.calibration.accel_z_neutral, 520);
    assert!(config.validate().is_ok());
}

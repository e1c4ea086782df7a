//! Compiled-in session configuration
//!
//! Generated by build.rs from nunchuk.toml. Edit the TOML and rebuild to
//! change it.

#[allow(unused_imports)]
use nunchuk_core::{Calibration, SessionConfig, Verbosity};
#[allow(unused_imports)]
use nunchuk_hal::ClockMode;

include!(concat!(env!("OUT_DIR"), "/session_config.rs"));

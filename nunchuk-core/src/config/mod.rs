//! Configuration types
//!
//! Board-agnostic session settings and calibration constants.

pub mod calibration;
pub mod types;

pub use calibration::*;
pub use types::*;

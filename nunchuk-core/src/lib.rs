//! Board-agnostic core logic for the Nunchuk driver
//!
//! This crate contains everything that does not touch the bus:
//!
//! - Register map and stateless field decoding
//! - Session state machine and error taxonomy
//! - Button debounce automaton
//! - Fixed-capacity sample window and running mean
//! - Configuration, calibration and diagnostics types

#![no_std]
#![deny(unsafe_code)]

pub mod buffer;
pub mod config;
pub mod diag;
pub mod input;
pub mod registers;
pub mod state;

pub use buffer::{CircularWindow, RunningMean};
pub use config::{Calibration, ConfigError, SessionConfig};
pub use diag::{Diagnostic, Diagnostics, NoDiagnostics, Severity, Verbosity};
pub use input::{DebounceState, DebounceSwitch, Edge};
pub use registers::{DeviceId, RawRegisterImage, Reading};
pub use state::{ErrorKind, Event, SessionState};

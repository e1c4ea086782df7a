//! Structured diagnostics
//!
//! The session reports what it is doing through an injected
//! [`Diagnostics`] sink instead of a global logger. Diagnostics never
//! influence control flow or return values.

use nunchuk_hal::CompletionCode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::registers::{DeviceId, RawRegisterImage};

/// Message severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Severity {
    Error,
    Info,
    Verbose,
}

/// Highest severity that is passed on to the sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Verbosity {
    /// Errors only
    Errors,
    /// Errors and informational messages
    #[default]
    Info,
    /// Everything, including raw bus data
    Verbose,
}

impl Verbosity {
    /// Check if messages of `severity` pass this filter
    pub fn allows(self, severity: Severity) -> bool {
        match severity {
            Severity::Error => true,
            Severity::Info => self >= Verbosity::Info,
            Severity::Verbose => self == Verbosity::Verbose,
        }
    }
}

/// Session events worth reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Diagnostic {
    /// Initialization sequence started
    ConnectStarted,
    /// Initialization write `step` (1 or 2) failed
    InitFailed { step: u8, code: CompletionCode },
    /// Initialization acknowledged
    Connected,
    /// Reconnect attempt before a read
    ReconnectAttempt { attempt: u8, of: u8 },
    /// Every reconnect attempt failed
    ReconnectFailed { attempts: u8 },
    /// Register pointer write failed
    RequestFailed { register: u8, code: CompletionCode },
    /// Fewer bytes than requested arrived
    ShortRead {
        register: u8,
        expected: u8,
        received: u8,
    },
    /// A full sensor image arrived
    RawData(RawRegisterImage),
    /// Identification block read
    Identified(DeviceId),
    /// Calibration block failed its checksum
    CalibrationRejected,
}

impl Diagnostic {
    /// Severity this event is reported with
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::InitFailed { .. }
            | Diagnostic::ReconnectFailed { .. }
            | Diagnostic::RequestFailed { .. }
            | Diagnostic::ShortRead { .. }
            | Diagnostic::CalibrationRejected => Severity::Error,
            Diagnostic::Connected
            | Diagnostic::ReconnectAttempt { .. }
            | Diagnostic::Identified(_) => Severity::Info,
            Diagnostic::ConnectStarted | Diagnostic::RawData(_) => Severity::Verbose,
        }
    }
}

/// Diagnostics sink
pub trait Diagnostics {
    /// Receive one message
    fn emit(&mut self, severity: Severity, diagnostic: &Diagnostic);
}

/// Sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiagnostics;

impl Diagnostics for NoDiagnostics {
    fn emit(&mut self, _severity: Severity, _diagnostic: &Diagnostic) {}
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn emit(&mut self, severity: Severity, diagnostic: &Diagnostic) {
        (**self).emit(severity, diagnostic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_filter() {
        assert!(Verbosity::Errors.allows(Severity::Error));
        assert!(!Verbosity::Errors.allows(Severity::Info));
        assert!(Verbosity::Info.allows(Severity::Info));
        assert!(!Verbosity::Info.allows(Severity::Verbose));
        assert!(Verbosity::Verbose.allows(Severity::Verbose));
    }

    #[test]
    fn test_severity_of_failures() {
        let failed = Diagnostic::InitFailed {
            step: 2,
            code: CompletionCode::NackOnAddress,
        };
        assert_eq!(failed.severity(), Severity::Error);
        assert_eq!(Diagnostic::Connected.severity(), Severity::Info);
        assert_eq!(
            Diagnostic::RawData(RawRegisterImage::ZERO).severity(),
            Severity::Verbose
        );
    }
}

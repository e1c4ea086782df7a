//! Diagnostics sinks

#[cfg(feature = "defmt")]
use nunchuk_core::diag::{Diagnostic, Diagnostics, Severity};

/// Forwards session diagnostics to the defmt logger
///
/// `Verbose` messages are logged at debug level.
#[cfg(feature = "defmt")]
#[derive(Debug, Clone, Copy, Default)]
pub struct DefmtDiagnostics;

#[cfg(feature = "defmt")]
impl Diagnostics for DefmtDiagnostics {
    fn emit(&mut self, severity: Severity, diagnostic: &Diagnostic) {
        match severity {
            Severity::Error => defmt::error!("nunchuk: {}", diagnostic),
            Severity::Info => defmt::info!("nunchuk: {}", diagnostic),
            Severity::Verbose => defmt::debug!("nunchuk: {}", diagnostic),
        }
    }
}

//! Events that trigger session state transitions

use super::machine::ErrorKind;

/// Outcomes of bus activity, as seen by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Both initialization writes were acknowledged
    InitAcknowledged,
    /// A full register image was received
    DataReceived,
    /// A write transaction completed with an error
    TransactionFailed(ErrorKind),
    /// Fewer bytes arrived than were requested
    ShortRead,
    /// Every reconnect attempt of one read failed
    RetriesExhausted,
    /// The application dropped the connection
    Disconnect,
}

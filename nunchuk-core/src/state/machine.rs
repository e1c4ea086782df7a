//! Session state definition
//!
//! Every error state is recoverable: the next connect or read attempt may
//! lead back to `Connected`.

use super::events::Event;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// No session established yet
    #[default]
    Disconnected,
    /// Initialization acknowledged, reads allowed
    Connected,
    /// Last transaction failed; the bus link is considered down
    Error(ErrorKind),
}

/// Types of errors that can occur
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// Malformed transaction (oversized payload, address or data NACK)
    BadValue,
    /// Uncategorized transport error
    BusFault,
    /// Device did not respond in time
    Timeout,
    /// No session could be established, or the link dropped mid-read
    NotConnected,
    /// No trusted sensor data to hand out
    NoDataAvailable,
}

impl SessionState {
    /// Check if reads may be issued without reconnecting first
    pub fn is_connected(&self) -> bool {
        matches!(self, SessionState::Connected)
    }

    /// Check if this is an error state
    pub fn is_error(&self) -> bool {
        matches!(self, SessionState::Error(_))
    }

    /// The error kind, if in an error state
    pub fn error(&self) -> Option<ErrorKind> {
        match self {
            SessionState::Error(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Result view of the state
    ///
    /// `Disconnected` reports `NotConnected`.
    pub fn as_result(&self) -> Result<(), ErrorKind> {
        match self {
            SessionState::Connected => Ok(()),
            SessionState::Disconnected => Err(ErrorKind::NotConnected),
            SessionState::Error(kind) => Err(*kind),
        }
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use SessionState::*;

        match (self, event) {
            // Initialization succeeds from anywhere and clears errors
            (_, InitAcknowledged) => Connected,

            (Connected, DataReceived) => Connected,

            // Any failure drops the link
            (_, TransactionFailed(kind)) => Error(kind),
            (_, ShortRead) => Error(ErrorKind::NotConnected),
            (Disconnected | Error(_), RetriesExhausted) => Error(ErrorKind::NotConnected),

            (_, Disconnect) => Disconnected,

            // Default: stay in current state
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_from_any_state() {
        let states = [
            SessionState::Disconnected,
            SessionState::Connected,
            SessionState::Error(ErrorKind::BadValue),
            SessionState::Error(ErrorKind::Timeout),
        ];

        for state in states {
            assert_eq!(
                state.transition(Event::InitAcknowledged),
                SessionState::Connected
            );
        }
    }

    #[test]
    fn test_failure_from_any_state() {
        let states = [
            SessionState::Disconnected,
            SessionState::Connected,
            SessionState::Error(ErrorKind::Timeout),
        ];

        for state in states {
            let next = state.transition(Event::TransactionFailed(ErrorKind::BusFault));
            assert_eq!(next, SessionState::Error(ErrorKind::BusFault));
            assert!(!next.is_connected());
        }
    }

    #[test]
    fn test_short_read_drops_link() {
        let next = SessionState::Connected.transition(Event::ShortRead);
        assert_eq!(next, SessionState::Error(ErrorKind::NotConnected));
    }

    #[test]
    fn test_retries_exhausted() {
        let next = SessionState::Error(ErrorKind::BadValue).transition(Event::RetriesExhausted);
        assert_eq!(next, SessionState::Error(ErrorKind::NotConnected));

        // Does not apply to a live session
        let next = SessionState::Connected.transition(Event::RetriesExhausted);
        assert_eq!(next, SessionState::Connected);
    }

    #[test]
    fn test_data_requires_connection() {
        assert_eq!(
            SessionState::Connected.transition(Event::DataReceived),
            SessionState::Connected
        );
        assert_eq!(
            SessionState::Disconnected.transition(Event::DataReceived),
            SessionState::Disconnected
        );
    }

    #[test]
    fn test_disconnect() {
        assert_eq!(
            SessionState::Connected.transition(Event::Disconnect),
            SessionState::Disconnected
        );
    }

    #[test]
    fn test_result_view() {
        assert_eq!(SessionState::Connected.as_result(), Ok(()));
        assert_eq!(
            SessionState::Disconnected.as_result(),
            Err(ErrorKind::NotConnected)
        );
        assert_eq!(
            SessionState::Error(ErrorKind::Timeout).as_result(),
            Err(ErrorKind::Timeout)
        );
        assert_eq!(
            SessionState::Error(ErrorKind::Timeout).error(),
            Some(ErrorKind::Timeout)
        );
        assert!(SessionState::Error(ErrorKind::Timeout).is_error());
    }
}

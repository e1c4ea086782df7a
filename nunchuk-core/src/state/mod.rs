//! Device session state machine
//!
//! Connection lifecycle of one accessory on one bus. The machine is
//! explicit, finite and deterministic; the driver feeds it events derived
//! from bus completion codes and byte counts.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::{ErrorKind, SessionState};

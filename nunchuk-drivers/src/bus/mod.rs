//! Bus adapters

pub mod embedded;

pub use embedded::{EmbeddedHalWire, BUFFER_LEN};

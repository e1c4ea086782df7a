//! Digital input conditioning

pub mod debounce;

pub use debounce::{DebounceState, DebounceSwitch, Edge, DEFAULT_CONFIRM_WINDOW_MS};

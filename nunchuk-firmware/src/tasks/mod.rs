//! Embassy async tasks

pub mod poll;

pub use poll::{poll_task, EmbassyClock};

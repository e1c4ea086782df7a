//! Fixed-capacity sample buffers
//!
//! Allocation-free building blocks for smoothing sensor values in the
//! application loop.

pub mod mean;
pub mod window;

pub use mean::RunningMean;
pub use window::CircularWindow;

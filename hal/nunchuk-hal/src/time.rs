//! Time source abstraction

/// Monotonic millisecond clock
///
/// The counter is allowed to wrap; consumers compare timestamps with
/// wrapping subtraction.
pub trait Clock {
    /// Milliseconds since an arbitrary epoch
    fn now_ms(&self) -> u32;

    /// Milliseconds elapsed since `earlier`
    fn elapsed_since(&self, earlier: u32) -> u32 {
        self.now_ms().wrapping_sub(earlier)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

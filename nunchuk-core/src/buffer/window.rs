//! Circular sample window
//!
//! Keeps the last `N` written values in a fixed array. The write position
//! wraps with a modulo, so there is no bounds case to handle.

/// Ring store of the last `N` samples
///
/// `storage[write_index]` is always the oldest retained value (the next one
/// to be overwritten) and `storage[(write_index + N - 1) % N]` the newest.
///
/// The window starts zero-initialized (`T::default()`). Until `N` writes have
/// happened, [`oldest`](Self::oldest) returns padding rather than a real
/// sample; callers that need true window semantics must count writes
/// themselves (see [`RunningMean::len`](super::RunningMean::len)).
#[derive(Debug, Clone)]
pub struct CircularWindow<T, const N: usize> {
    storage: [T; N],
    write_index: usize,
}

impl<T: Copy + Default, const N: usize> CircularWindow<T, N> {
    const NON_EMPTY: () = assert!(N > 0, "CircularWindow needs a capacity of at least one");

    /// Create a zero-initialized window
    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_EMPTY;

        Self {
            storage: [T::default(); N],
            write_index: 0,
        }
    }

    /// Store `value` at the write position and advance it
    ///
    /// Overwrites the oldest value.
    pub fn write(&mut self, value: T) {
        self.storage[self.write_index] = value;
        self.write_index = (self.write_index + 1) % N;
    }

    /// The value that the next [`write`](Self::write) will evict
    pub fn oldest(&self) -> &T {
        &self.storage[self.write_index]
    }

    /// The most recently written value
    pub fn newest(&self) -> &T {
        &self.storage[(self.write_index + N - 1) % N]
    }

    /// Window capacity
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let (newer, older) = self.storage.split_at(self.write_index);
        older.iter().chain(newer.iter())
    }
}

impl<T: Copy + Default, const N: usize> Default for CircularWindow<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

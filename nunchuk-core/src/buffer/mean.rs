//! Running arithmetic mean over a sliding window
//!
//! The sum is maintained incrementally: each [`RunningMean::shift`] adds the
//! new sample and subtracts the one it evicts, so both `sum` and `mean` are
//! O(1) and the integer sum never drifts.

use super::window::CircularWindow;

/// Mean of the last `N` samples
///
/// Before `N` samples have been shifted in, [`mean`](Self::mean) averages
/// over zero padding (the sum is divided by `N`, not by the number of real
/// samples). Use [`mean_of_samples`](Self::mean_of_samples) or
/// [`is_full`](Self::is_full) when that matters.
#[derive(Debug, Clone)]
pub struct RunningMean<T, const N: usize> {
    window: CircularWindow<T, N>,
    /// Sum of every value currently in the window
    sum: i64,
    /// Real samples in the window (saturates at N)
    filled: usize,
}

impl<T, const N: usize> RunningMean<T, N>
where
    T: Copy + Default + Into<i64>,
{
    /// Create an empty (zero-padded) running mean
    pub fn new() -> Self {
        Self {
            window: CircularWindow::new(),
            sum: 0,
            filled: 0,
        }
    }

    /// Push a sample, evicting the oldest
    pub fn shift(&mut self, value: T) {
        // Must be read before the write overwrites the slot
        let evicted: i64 = (*self.window.oldest()).into();

        self.window.write(value);
        self.sum += value.into() - evicted;

        if self.filled < N {
            self.filled += 1;
        }
    }

    /// Exact integer sum of the window
    pub fn sum(&self) -> i64 {
        self.sum
    }

    /// Sum divided by the window width `N`
    ///
    /// Exact for sums below 2^53.
    pub fn mean(&self) -> f64 {
        self.sum as f64 / N as f64
    }

    /// Mean over the real samples only
    ///
    /// Returns `None` if nothing has been shifted in yet.
    pub fn mean_of_samples(&self) -> Option<f64> {
        if self.filled == 0 {
            return None;
        }
        Some(self.sum as f64 / self.filled as f64)
    }

    /// Number of real samples in the window
    pub fn len(&self) -> usize {
        self.filled
    }

    /// Check if no sample has been shifted in
    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// Check if the window holds `N` real samples
    pub fn is_full(&self) -> bool {
        self.filled == N
    }

    /// Most recent sample
    pub fn latest(&self) -> T {
        *self.window.newest()
    }

    /// Underlying window
    pub fn window(&self) -> &CircularWindow<T, N> {
        &self.window
    }

    /// Drop all samples
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl<T, const N: usize> Default for RunningMean<T, N>
where
    T: Copy + Default + Into<i64>,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_of_full_window() {
        let mut avg: RunningMean<i16, 4> = RunningMean::new();
        for v in [10, 20, 30, 40] {
            avg.shift(v);
        }
        assert_eq!(avg.sum(), 100);
        assert_eq!(avg.mean(), 25.0);
        assert!(avg.is_full());
    }

    #[test]
    fn test_eviction_uses_old_value() {
        let mut avg: RunningMean<i16, 3> = RunningMean::new();
        for v in [1, 2, 3, 100] {
            avg.shift(v);
        }
        // Window is 2, 3, 100
        assert_eq!(avg.sum(), 105);
        assert_eq!(avg.latest(), 100);
    }

    #[test]
    fn test_negative_samples() {
        let mut avg: RunningMean<i16, 2> = RunningMean::new();
        avg.shift(-512);
        avg.shift(-511);
        assert_eq!(avg.sum(), -1023);
        assert_eq!(avg.mean(), -511.5);
    }

    #[test]
    fn test_partial_window_averages_padding() {
        let mut avg: RunningMean<i16, 4> = RunningMean::new();
        avg.shift(8);
        assert_eq!(avg.mean(), 2.0);
        assert_eq!(avg.mean_of_samples(), Some(8.0));
        assert_eq!(avg.len(), 1);
        assert!(!avg.is_full());
    }

    #[test]
    fn test_empty() {
        let avg: RunningMean<u8, 4> = RunningMean::new();
        assert!(avg.is_empty());
        assert_eq!(avg.mean_of_samples(), None);
        assert_eq!(avg.mean(), 0.0);
    }

    #[test]
    fn test_mean_of_large_samples() {
        let mut avg: RunningMean<i32, 2> = RunningMean::new();
        avg.shift(i32::MAX);
        avg.shift(i32::MAX - 1);
        assert_eq!(avg.sum(), 4_294_967_293);
        assert_eq!(avg.mean(), 2_147_483_646.5);
        assert_eq!(avg.mean_of_samples(), Some(2_147_483_646.5));
    }

    #[test]
    fn test_reset() {
        let mut avg: RunningMean<i32, 2> = RunningMean::new();
        avg.shift(5);
        avg.shift(6);
        avg.reset();
        assert_eq!(avg.sum(), 0);
        assert!(avg.is_empty());
    }
}

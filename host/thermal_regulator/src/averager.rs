use heapless::Vec;

/// Number of raw readings averaged into one filtered measurement.
/// One control cycle lasts `WINDOW_CAPACITY` sampling intervals.
pub const WINDOW_CAPACITY: usize = 10;

pub struct SampleAverager<const N: usize> {
    window: Vec<u16, N>,
}

impl<const N: usize> SampleAverager<N> {
    const NON_EMPTY: () = assert!(N > 0, "sample window capacity must be non-zero");

    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_EMPTY;
        Self { window: Vec::new() }
    }

    /// Appends a raw reading. Once the window is full, returns the mean of
    /// its readings (rounded down) and starts over with an empty window.
    pub fn add_sample(&mut self, raw: u16) -> Option<u16> {
        if self.window.push(raw).is_err() {
            // the window is drained as soon as it fills up
            unreachable!("sample window overflow");
        }
        if !self.window.is_full() {
            return None;
        }

        let sum: u64 = self.window.iter().map(|&sample| u64::from(sample)).sum();
        self.window.clear();
        Some((sum / N as u64) as u16)
    }

    pub fn fill_count(&self) -> usize {
        self.window.len()
    }

    pub fn capacity(&self) -> usize {
        N
    }

    pub fn reset(&mut self) {
        self.window.clear();
    }
}

impl<const N: usize> Default for SampleAverager<N> {
    fn default() -> Self {
        Self::new()
    }
}

//! Seeded pseudo-random number generation.
//!
//! A small xorshift64 keeps synthetic output reproducible for a fixed
//! seed, which the tests rely on. Nothing here is suitable for anything
//! beyond fabricating plausible demo values.

/// Deterministic xorshift64 generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    /// Creates a generator from a seed. A zero seed is replaced with a
    /// fixed non-zero constant since xorshift cannot leave state zero.
    #[must_use]
    pub const fn seeded(seed: u64) -> Self {
        let state = if seed == 0 {
            0x9E37_79B9_7F4A_7C15
        } else {
            seed
        };
        Self { state }
    }

    /// Next raw 64-bit value.
    pub const fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform value in `[0, 1)`.
    #[allow(clippy::cast_precision_loss)]
    pub const fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform float in `[lo, hi)`.
    pub const fn range_f64(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Uniform integer in `[lo, hi]` (inclusive).
    ///
    /// # Panics
    ///
    /// Panics if `lo > hi`.
    pub fn range_u64(&mut self, lo: u64, hi: u64) -> u64 {
        assert!(lo <= hi, "range_u64 requires lo <= hi");
        lo + self.next_u64() % (hi - lo + 1)
    }

    /// Picks one element of a non-empty slice.
    ///
    /// # Panics
    ///
    /// Panics if `items` is empty.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        assert!(!items.is_empty(), "choose requires a non-empty slice");
        #[allow(clippy::cast_possible_truncation)]
        let idx = (self.next_u64() % items.len() as u64) as usize;
        &items[idx]
    }
}

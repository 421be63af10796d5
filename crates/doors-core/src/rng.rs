#![forbid(unsafe_code)]

//! Uniform randomness supplied by the host.
//!
//! Widgets never reach for a global generator. They are handed a
//! [`RandomSource`]: in the browser that is `Math.random`, in tests and
//! reproducible runs it is the seeded [`Xorshift64`].

/// A source of uniform samples in `[0, 1)`.
pub trait RandomSource {
    /// Next sample, uniformly distributed in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// `true` with probability `p` (clamped to `[0, 1]`).
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Seed used when the caller passes `0` (xorshift has a fixed point at zero).
const FALLBACK_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Deterministic xorshift64 PRNG.
#[derive(Debug, Clone)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    /// Create a generator from `seed`. A zero seed is replaced.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { FALLBACK_SEED } else { seed },
        }
    }

    /// Next raw 64-bit output.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

impl Default for Xorshift64 {
    fn default() -> Self {
        Self::new(FALLBACK_SEED)
    }
}

impl RandomSource for Xorshift64 {
    #[inline]
    fn next_f64(&mut self) -> f64 {
        // Top 53 bits fill the f64 mantissa exactly.
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

//! xorshift32 generator whose state travels between slices.
//!
//! The full state is one `u32`, so a slice can return it and the next
//! slice resumes the same stream. Not suitable for cryptography.
//!
//! # Reference
//! Marsaglia (2003), "Xorshift RNGs", Journal of Statistical Software 8(14)

use rand::rand_core::impls;
use rand::{RngCore, SeedableRng};

/// Substitute for the all-zero state, which xorshift never leaves.
const ZERO_SEED_REPLACEMENT: u32 = 0x9E37_79B9;

/// 32-bit xorshift generator (shifts 13, 17, 5).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// Creates a generator. A zero seed is replaced by a fixed constant.
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { ZERO_SEED_REPLACEMENT } else { seed };
        Self { state }
    }

    /// Current state; seeding a new generator with it continues the stream.
    #[inline]
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl RngCore for XorShift32 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        let mut s = self.state;
        s ^= s << 13;
        s ^= s >> 17;
        s ^= s << 5;
        self.state = s;
        s
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst)
    }
}

impl SeedableRng for XorShift32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new((state ^ (state >> 32)) as u32)
    }
}

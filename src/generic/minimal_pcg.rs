//! A simple pseudorandom number generator.
//!
//! Specifically, a translation of the *really* minimal C PCG32 implementation from <https://www.pcg-random.org/>, implemented to satisfy the [RngCore] trait.
//!
//! The solver and the [kitten](crate::kitten) sub-solver only need randomness for shuffling and phase initialisation, so something small and deterministic given a seed is what's wanted.
//! Each [context](crate::context) takes its seed from [Config::random_seed](crate::config::Config::random_seed).

use rand::SeedableRng;
use rand_core::{impls, RngCore};

/// State and increment
#[derive(Clone, Default)]
pub struct MinimalPCG32 {
    state: u64,
    inc: u64,
}

impl RngCore for MinimalPCG32 {
    fn next_u32(&mut self) -> u32 {
        let old_state = self.state;

        self.state = old_state
            .wrapping_mul(6364136223846793005_u64)
            .wrapping_add(self.inc);

        let xorshifted = (((old_state >> 18) ^ old_state) >> 27) as u32;
        let rot = (old_state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }
}

impl SeedableRng for MinimalPCG32 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        // Any odd increment will do.
        const INCREMENT: u64 = 3215534235932367345;
        Self {
            state: (u64::from_le_bytes(seed)).wrapping_add(INCREMENT),
            inc: INCREMENT,
        }
    }
}

impl MinimalPCG32 {
    /// A generator seeded by `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::from_seed(seed.to_le_bytes())
    }
}

#[cfg(test)]
mod pcg_tests {
    use super::*;

    #[test]
    fn two_seed() {
        let mut two_seed = MinimalPCG32::seeded(2);
        assert_eq!(two_seed.next_u32(), 614454398);
        assert_eq!(two_seed.next_u32(), 3845882165);
        assert_eq!(two_seed.next_u32(), 3758051893);
        assert_eq!(two_seed.next_u32(), 3127488971);
        assert_eq!(two_seed.next_u32(), 405677829);
    }

    #[test]
    fn seventy_three_seed() {
        let mut seventy_three_seed = MinimalPCG32::seeded(73);
        assert_eq!(seventy_three_seed.next_u32(), 614454398);
        assert_eq!(seventy_three_seed.next_u32(), 1485357404);
        assert_eq!(seventy_three_seed.next_u32(), 3254803697);
        assert_eq!(seventy_three_seed.next_u32(), 2095794200);
        assert_eq!(seventy_three_seed.next_u32(), 3995120281);
    }
}

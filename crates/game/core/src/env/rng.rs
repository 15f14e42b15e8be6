//! Deterministic random draws.
//!
//! The only random decision the engine makes is picking a target among
//! several candidates under [`crate::Priority::Random`]. Draws are derived
//! from the field seed and a per-field nonce, so a replay from the same field
//! state picks the same targets.

/// Deterministic random number source.
///
/// Implementations must produce the same value for the same seed.
pub trait RngOracle: Send + Sync {
    fn next_u32(&self, seed: u64) -> u32;

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }

    /// Uniform index into a non-empty slice of `len` candidates.
    fn pick_index(&self, seed: u64, len: usize) -> usize {
        let last = u32::try_from(len.saturating_sub(1)).unwrap_or(u32::MAX);
        self.range(seed, 0, last) as usize
    }
}

/// PCG-XSH-RR generator: 64-bit state, 32-bit output.
///
/// Stateless by design of the oracle: every draw is a single step from the
/// supplied seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Mixes the field seed with the draw nonce, the acting object and a context
/// value into a single seed.
///
/// `context` separates independent draws made for the same actor and nonce;
/// the engine passes the current tick.
pub fn compute_seed(field_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    let mut hash = field_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(actor_id).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    // avalanche
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}

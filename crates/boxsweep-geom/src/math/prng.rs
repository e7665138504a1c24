// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

/// Stateful `xoroshiro128+` pseudo-random number generator for reproducible
/// box layouts.
///
/// * Not cryptographically secure; use only for test scenes and benchmarks.
/// * Matching seeds yield identical sequences across supported platforms, so a
///   failing scenario can be replayed from its seed alone.
#[derive(Debug, Clone, Copy)]
pub struct Prng {
    state: [u64; 2],
}

/// Replaces the all-zero state, which xoroshiro never leaves.
const ZERO_STATE_FILL: u64 = 0x9e37_79b9_7f4a_7c15;

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

impl Prng {
    /// Constructs a PRNG from two 64-bit seeds.
    pub fn from_seed(seed0: u64, seed1: u64) -> Self {
        let state = if seed0 | seed1 == 0 {
            [ZERO_STATE_FILL, 0]
        } else {
            [seed0, seed1]
        };
        Self { state }
    }

    /// Constructs a PRNG from a single 64-bit seed via SplitMix64 expansion.
    ///
    /// This is what scenario configs use: one `seed` field names a scene.
    pub fn from_seed_u64(seed: u64) -> Self {
        let mut sm = seed;
        let hi = splitmix64(&mut sm);
        Self::from_seed(hi, splitmix64(&mut sm))
    }

    /// Returns the next raw 64-bit output.
    pub fn next_u64(&mut self) -> u64 {
        let [s0, s1] = self.state;
        let out = s0.wrapping_add(s1);
        let x = s1 ^ s0;
        self.state = [s0.rotate_left(55) ^ x ^ (x << 14), x.rotate_left(36)];
        out
    }

    /// Returns the next float in `[0, 1)` built from the top 23 output bits.
    pub fn next_f32(&mut self) -> f32 {
        let mantissa = (self.next_u64() >> 41) as u32;
        f32::from_bits(0x3f80_0000 | mantissa) - 1.0
    }

    /// Returns the next float in `[lo, hi)`; returns `lo` when the range is empty.
    pub fn next_range(&mut self, lo: f32, hi: f32) -> f32 {
        let t = self.next_f32();
        if hi <= lo {
            return lo;
        }
        let v = lo + (hi - lo) * t;
        // Rounding can land exactly on `hi` for wide ranges.
        if v >= hi {
            lo
        } else {
            v
        }
    }
}

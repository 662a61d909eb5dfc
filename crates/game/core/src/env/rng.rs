//! Deterministic random number generation.
//!
//! All randomness in the simulation flows through a [`RandomSource`] that is
//! passed explicitly to the code that needs it. The canonical implementation is
//! [`PcgRng`], whose full state is part of the persisted game state so a loaded
//! save continues the exact same stream.
//!
//! # Determinism
//!
//! Given the same seed and the same sequence of draws, every implementation
//! must produce the same values. Consumers draw in a fixed order per action:
//!
//! 1. event selection (one weighted draw, or one uniform draw on zero weight)
//! 2. synchronous challenge resolvers (resolver-specific, documented there)
//! 3. combat session seed (one `u64` when a session opens)
//!
//! Fate-deck shuffles use the combat session's own [`PcgRng`].

/// Source of deterministic random numbers.
///
/// Test harnesses substitute fixed sequences by implementing this trait.
pub trait RandomSource {
    /// Next raw 32-bit value of the sequence.
    fn next_u32(&mut self) -> u32;

    /// Next raw 64-bit value, built from two 32-bit draws (high word first).
    fn next_u64(&mut self) -> u64 {
        let high = u64::from(self.next_u32());
        let low = u64::from(self.next_u32());
        (high << 32) | low
    }

    /// Uniform value in `[0, bound)`. Returns 0 when `bound` is 0.
    ///
    /// Consumes exactly one draw regardless of `bound`.
    fn next_below(&mut self, bound: u32) -> u32 {
        let value = self.next_u32();
        if bound == 0 { 0 } else { value % bound }
    }

    /// Roll a die with N sides (1-N inclusive).
    fn roll_die(&mut self, sides: u32) -> u32 {
        self.next_below(sides.max(1)) + 1
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state.
///
/// # Properties
///
/// - **Deterministic**: Same seed always produces same output
/// - **Fast**: Single multiply + xorshift + rotate
/// - **Small state**: Only 64 bits, cheap to persist
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator from a 64-bit seed.
    ///
    /// The seed is scrambled first so that nearby seeds diverge immediately.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            state: scramble_seed(seed),
        }
    }

    /// Restores a generator from a persisted state word.
    pub const fn from_state(state: u64) -> Self {
        Self { state }
    }

    /// Current internal state (for snapshots).
    pub const fn state(&self) -> u64 {
        self.state
    }

    /// Advance the PCG state by one step.
    ///
    /// Uses LCG formula: `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RandomSource for PcgRng {
    fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }
}

/// Scramble a user-provided seed into an initial PCG state.
///
/// SplitMix64 finalizer; seed 0 does not produce a degenerate stream.
pub fn scramble_seed(seed: u64) -> u64 {
    let mut hash = seed.wrapping_add(0x9e3779b97f4a7c15);
    hash = (hash ^ (hash >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    hash = (hash ^ (hash >> 27)).wrapping_mul(0x94d049bb133111eb);
    hash ^ (hash >> 31)
}

/// Fisher-Yates shuffle driven by a [`RandomSource`].
///
/// Draws exactly `len - 1` values for a slice of length `len`.
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = rng.next_below((i + 1) as u32) as usize;
        items.swap(i, j);
    }
}

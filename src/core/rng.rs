//! Random sources for the die.
//!
//! ## Key Features
//!
//! - **Injectable**: the die is generic over [`RollSource`], so tests can
//!   substitute a scripted sequence instead of process-wide randomness
//! - **Deterministic**: same seed produces the identical roll sequence
//! - **Serializable**: O(1) state capture and restore for replays
//!
//! ```
//! use ladder_games::core::{GameRng, RollSource};
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.draw(1, 6), b.draw(1, 6));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// A source of uniformly distributed die faces.
pub trait RollSource {
    /// Draw a value uniformly from `low..=high`.
    ///
    /// Implementations must never return a value outside that range.
    fn draw(&mut self, low: u8, high: u8) -> u8;
}

/// Seeded ChaCha8 generator used by the die in normal play.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from the thread-local generator.
    ///
    /// The chosen seed is still recorded, so a game started this way can be
    /// replayed from [`GameRng::state`].
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this generator was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

impl RollSource for GameRng {
    fn draw(&mut self, low: u8, high: u8) -> u8 {
        self.inner.gen_range(low..=high)
    }
}

/// Serializable RNG state for replays.
///
/// Uses the ChaCha8 word position, so capture is O(1) regardless of how many
/// rolls have been made.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// A fixed, repeating sequence of rolls.
///
/// Values are clamped into the requested range, so a scripted `1` asked for
/// by a turn-marker roll (3-6) comes back as `3`. An empty script always
/// yields the low end of the range.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRolls {
    values: Vec<u8>,
    cursor: usize,
}

impl ScriptedRolls {
    /// Create a script that cycles through `values`.
    pub fn new(values: impl IntoIterator<Item = u8>) -> Self {
        Self {
            values: values.into_iter().collect(),
            cursor: 0,
        }
    }

    /// Number of values drawn so far.
    #[must_use]
    pub fn drawn(&self) -> usize {
        self.cursor
    }
}

impl RollSource for ScriptedRolls {
    fn draw(&mut self, low: u8, high: u8) -> u8 {
        if self.values.is_empty() {
            return low;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(low, high)
    }
}

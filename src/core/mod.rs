//! Core engine types: errors, players, random sources.
//!
//! These are the building blocks both game variants share; the board, die
//! and turn controller are built on top of them.

pub mod error;
pub mod player;
pub mod rng;

pub use error::{GameError, Result};
pub use player::{Player, PlayerColor, PlayerId};
pub use rng::{GameRng, GameRngState, RollSource, ScriptedRolls};

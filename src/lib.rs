//! # ladder-games
//!
//! A turn-based board game engine for a small educational game suite: a
//! snakes-and-ladders style ladder game and the "Missing Diamond" board game.
//!
//! ## Design Principles
//!
//! 1. **One Engine, Two Games**: both variants share the same roll, move,
//!    check-win, advance-turn cycle. They differ only in configuration
//!    (entry rule, kind of tile action).
//!
//! 2. **Synchronous Observers**: die rolls, moves, turn changes and the end
//!    of the game are pushed to registered sinks on the calling thread, in
//!    registration order. Sinks are held weakly.
//!
//! 3. **Injectable Randomness**: the die draws from a [`RollSource`]; a
//!    seeded ChaCha8 generator in play, a scripted sequence in tests.
//!
//! 4. **Fail Fast**: every violation is returned as a [`GameError`] at the
//!    point it happens. Nothing is retried or rolled back.
//!
//! ## Modules
//!
//! - `core`: Errors, players, random sources
//! - `board`: Tiles and the tile graph
//! - `dice`: The die and its observers
//! - `observers`: Sink traits and the weak observer list
//! - `engine`: The turn controller state machine
//! - `games`: The two variants, builder and JSON configuration

pub mod core;
pub mod board;
pub mod dice;
pub mod observers;
pub mod engine;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    GameError, Result,
    Player, PlayerColor, PlayerId,
    GameRng, GameRngState, RollSource, ScriptedRolls,
};

pub use crate::board::{Tile, TileAction, TileGraph, TileId, TileSpec};

pub use crate::dice::Die;

pub use crate::observers::{
    DieObserver, GameObserver, ObserverError, ObserverId, ObserverList, ObserverResult,
};

pub use crate::engine::{EntryRule, GameEngine, GameStatus, TurnKind, TurnRecord};

pub use crate::games::{GameBuilder, GameConfig, GameVariant, LinkConfig, PlayerConfig};

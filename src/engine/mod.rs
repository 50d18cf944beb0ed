//! Turn-based game engine shared by the ladder game and Missing Diamond.
//!
//! ## State Machine
//!
//! - `Setup -> InProgress` on [`GameEngine::start`] (two or more players,
//!   non-empty board)
//! - `InProgress -> InProgress` on [`GameEngine::play_turn`]
//! - `InProgress -> Finished` when a move lands on the terminal tile
//! - `Finished` is absorbing
//!
//! ## Concurrency
//!
//! Everything runs to completion on the calling thread, observers included.
//! Callers sharing an engine across threads need one lock around the whole
//! `play_turn` call; the engine holds no finer-grained state.

mod game;
mod history;

pub use game::{EntryRule, GameEngine, GameStatus, MIN_PLAYERS};
pub use history::{TurnKind, TurnRecord};

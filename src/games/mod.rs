//! The two games built on the engine.
//!
//! The variants share the whole turn cycle and differ only in how players
//! enter the board and what kind of tile action a board link becomes:
//!
//! | Variant          | Entry                    | Links            |
//! |------------------|--------------------------|------------------|
//! | Ladder           | turn-marker roll (> 3)   | ladders, snakes  |
//! | Missing Diamond  | immediate                | teleports        |
//!
//! Games are assembled with [`GameBuilder`] or described as data with
//! [`GameConfig`].

mod config;
mod variant;

pub use config::{GameConfig, LinkConfig, PlayerConfig};
pub use variant::{GameBuilder, GameVariant};

//! Observer capabilities.

use thiserror::Error;

use crate::board::TileId;
use crate::core::Player;

/// Failure reported by an observer callback.
///
/// Returning an error aborts the notification sequence in progress and is
/// surfaced to the caller as [`GameError::Observer`].
///
/// [`GameError::Observer`]: crate::core::GameError::Observer
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ObserverError {
    message: String,
}

impl ObserverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type returned by observer callbacks.
pub type ObserverResult = Result<(), ObserverError>;

/// Receives every value the die produces.
pub trait DieObserver {
    /// Called synchronously after each roll, before the roll returns.
    fn on_roll(&mut self, value: u8) -> ObserverResult;
}

/// Receives turn-level events from the game engine.
///
/// All callbacks default to doing nothing, so a sink only implements what it
/// cares about. Within one turn the order is always `on_die_rolled`, then
/// `on_player_moved` (skipped for turn-marker entry rolls), then either
/// `on_game_ended` or `on_turn_changed`.
pub trait GameObserver {
    fn on_player_moved(&mut self, _player: &Player, _from: TileId, _to: TileId) -> ObserverResult {
        Ok(())
    }

    fn on_die_rolled(&mut self, _player: &Player, _value: u8) -> ObserverResult {
        Ok(())
    }

    fn on_game_ended(&mut self, _winner: &Player) -> ObserverResult {
        Ok(())
    }

    fn on_turn_changed(&mut self, _current: &Player) -> ObserverResult {
        Ok(())
    }
}

//! Turn history.

use serde::{Deserialize, Serialize};

use crate::board::TileId;
use crate::core::PlayerId;

/// What a completed turn amounted to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnKind {
    /// A turn-marker roll by a player who had not yet entered the board.
    Entry { entered: bool },
    /// An ordinary move.
    Move,
    /// A move that reached the terminal tile.
    Win,
}

/// Record of one completed turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Turn number (starts at 1).
    pub turn: u32,
    /// Who played the turn.
    pub player: PlayerId,
    /// Raw die value (turn-marker value for entry turns).
    pub roll: u8,
    /// Tile before the turn.
    pub from: TileId,
    /// Tile after the turn, with any tile action applied.
    pub to: TileId,
    pub kind: TurnKind,
}

impl TurnRecord {
    /// Did this turn win the game?
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.kind == TurnKind::Win
    }

    /// Did the player change tiles?
    #[must_use]
    pub fn moved(&self) -> bool {
        self.from != self.to
    }
}

//! Players and their movement along the board.
//!
//! ## PlayerId
//!
//! Type-safe player identifier supporting 1-255 players. Player equality is
//! by id, never by position.
//!
//! ## Player
//!
//! Name, display color and the tile the player currently stands on. The tile
//! is a relation into the [`TileGraph`], not ownership; it is only changed by
//! [`Player::advance`].

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use super::error::{GameError, Result};
use crate::board::{TileGraph, TileId};
use crate::dice::{MAX_FACE, MIN_FACE};

/// Player identifier supporting 1-255 players.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Display color of a player's pawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
    Black,
    White,
}

impl PlayerColor {
    /// Colors in the order they are handed out by default.
    pub const PALETTE: [PlayerColor; 8] = [
        PlayerColor::Red,
        PlayerColor::Blue,
        PlayerColor::Green,
        PlayerColor::Yellow,
        PlayerColor::Purple,
        PlayerColor::Orange,
        PlayerColor::Black,
        PlayerColor::White,
    ];

    /// Default color for the n-th seat, wrapping around the palette.
    #[must_use]
    pub fn for_seat(seat: usize) -> Self {
        Self::PALETTE[seat % Self::PALETTE.len()]
    }
}

impl std::fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PlayerColor::Red => "red",
            PlayerColor::Blue => "blue",
            PlayerColor::Green => "green",
            PlayerColor::Yellow => "yellow",
            PlayerColor::Purple => "purple",
            PlayerColor::Orange => "orange",
            PlayerColor::Black => "black",
            PlayerColor::White => "white",
        };
        f.write_str(name)
    }
}

/// A participant in a game session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    color: PlayerColor,
    tile: TileId,
    entered: bool,
}

impl Player {
    /// Create a player standing on the start tile.
    ///
    /// Fails with `InvalidArgument` when the name is blank.
    pub fn new(id: PlayerId, name: impl Into<String>, color: PlayerColor) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(GameError::invalid_argument(format!(
                "{id} must have a non-empty name"
            )));
        }
        Ok(Self {
            id,
            name,
            color,
            tile: TileId::START,
            entered: false,
        })
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn color(&self) -> PlayerColor {
        self.color
    }

    /// The tile the player currently stands on.
    #[must_use]
    pub fn tile(&self) -> TileId {
        self.tile
    }

    /// Whether the player has entered the board.
    ///
    /// Only meaningful for games that use a turn-marker entry rule.
    #[must_use]
    pub fn is_entered(&self) -> bool {
        self.entered
    }

    pub(crate) fn enter(&mut self) {
        self.entered = true;
    }

    pub(crate) fn reset(&mut self) {
        self.tile = TileId::START;
        self.entered = false;
    }

    /// Move the player `roll` tiles forward.
    ///
    /// The target is clamped to the terminal tile on overshoot, then the
    /// landing tile's action (if any) is applied once. Returns the
    /// `(from, to)` pair for event reporting.
    ///
    /// ## Errors
    ///
    /// - `InvalidArgument` if `roll` is not a die face
    /// - `InvalidState` if the board has no tiles
    /// - `OutOfRange` if the player's tile is not on `board`
    #[doc(alias = "move")]
    pub fn advance(&mut self, roll: u8, board: &TileGraph) -> Result<(TileId, TileId)> {
        if !(MIN_FACE..=MAX_FACE).contains(&roll) {
            return Err(GameError::invalid_argument(format!(
                "cannot move by {roll}: rolls are {MIN_FACE}-{MAX_FACE}"
            )));
        }
        let terminal = board
            .terminal()
            .ok_or_else(|| GameError::invalid_state("cannot move on an empty board"))?;

        let from = board.resolve(self.tile.index())?.id();
        let target = (from.index() + roll as usize).min(terminal.id().index());
        let landed = board.resolve(target)?;
        let destination = board.apply_action(landed)?;

        self.tile = destination.id();
        Ok((from, self.tile))
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Player {}

impl Hash for Player {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.color)
    }
}

//! Tiles and tile actions.

use serde::{Deserialize, Serialize};

/// Position of a tile along the track.
///
/// Tiles are numbered contiguously from 0; the highest index is the
/// terminal (winning) tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    /// The tile every player starts on.
    pub const START: TileId = TileId(0);

    /// Create a new tile ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index as `usize`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// What happens when a player lands on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileAction {
    /// Ladder (forward) or snake (backward) in the ladder game.
    Jump(TileId),
    /// Teleport to a distant tile in Missing Diamond.
    Teleport(TileId),
}

impl TileAction {
    /// Where the action sends the player.
    #[must_use]
    pub fn target(self) -> TileId {
        match self {
            TileAction::Jump(target) | TileAction::Teleport(target) => target,
        }
    }
}

/// A single board position. Immutable once the board is built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    action: Option<TileAction>,
}

impl Tile {
    #[must_use]
    pub fn id(&self) -> TileId {
        self.id
    }

    #[must_use]
    pub fn action(&self) -> Option<TileAction> {
        self.action
    }

    /// Does landing here move the player again?
    #[must_use]
    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }
}

/// Input description of one tile, used to build a [`TileGraph`].
///
/// [`TileGraph`]: super::TileGraph
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSpec {
    pub index: u32,
    #[serde(default)]
    pub action: Option<TileAction>,
}

impl TileSpec {
    /// A tile with no action.
    #[must_use]
    pub fn plain(index: u32) -> Self {
        Self {
            index,
            action: None,
        }
    }

    /// A tile carrying `action`.
    #[must_use]
    pub fn with_action(index: u32, action: TileAction) -> Self {
        Self {
            index,
            action: Some(action),
        }
    }

    pub(crate) fn into_tile(self) -> Tile {
        Tile {
            id: TileId(self.index),
            action: self.action,
        }
    }
}

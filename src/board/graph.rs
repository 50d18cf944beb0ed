//! Tile graph: the ordered track players traverse.

use rustc_hash::FxHashSet;
use serde::Serialize;
use smallvec::SmallVec;

use super::tile::{Tile, TileAction, TileId, TileSpec};
use crate::core::{GameError, Result};

/// An ordered, validated sequence of tiles.
///
/// The last tile is the terminal tile. Construction rejects:
/// - indices that are not exactly `0..len` in order
/// - action targets off the board
/// - an action on the terminal tile (the game could never be won)
/// - jump chains that loop back on themselves
///
/// Multi-hop chains that do terminate (3 -> 5 -> 7) are accepted, but
/// [`TileGraph::apply_action`] only ever follows one hop.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TileGraph {
    tiles: Vec<Tile>,
}

impl TileGraph {
    /// Build a graph from tile specifications in track order.
    pub fn new(specs: impl IntoIterator<Item = TileSpec>) -> Result<Self> {
        let tiles: Vec<Tile> = specs.into_iter().map(TileSpec::into_tile).collect();

        for (position, tile) in tiles.iter().enumerate() {
            if tile.id().index() != position {
                return Err(GameError::malformed(format!(
                    "tile at position {position} has index {}",
                    tile.id().0
                )));
            }
            if let Some(action) = tile.action() {
                if action.target().index() >= tiles.len() {
                    return Err(GameError::malformed(format!(
                        "{} sends players to {}, which is not on a {}-tile board",
                        tile.id(),
                        action.target(),
                        tiles.len()
                    )));
                }
            }
        }

        if let Some(last) = tiles.last() {
            if last.has_action() {
                return Err(GameError::malformed(format!(
                    "terminal {} must not carry an action",
                    last.id()
                )));
            }
        }

        let graph = Self { tiles };
        graph.reject_cycles()?;
        Ok(graph)
    }

    /// A plain track of `len` tiles with no actions.
    #[must_use]
    pub fn linear(len: u32) -> Self {
        Self {
            tiles: (0..len).map(|i| TileSpec::plain(i).into_tile()).collect(),
        }
    }

    /// A track of `len` tiles with the given `(index, action)` pairs.
    pub fn with_actions(
        len: u32,
        actions: impl IntoIterator<Item = (u32, TileAction)>,
    ) -> Result<Self> {
        let mut specs: Vec<TileSpec> = (0..len).map(TileSpec::plain).collect();
        for (index, action) in actions {
            let spec = specs
                .get_mut(index as usize)
                .ok_or(GameError::OutOfRange {
                    index: index as usize,
                    len: len as usize,
                })?;
            spec.action = Some(action);
        }
        Self::new(specs)
    }

    fn reject_cycles(&self) -> Result<()> {
        for tile in self.tiles.iter().filter(|t| t.has_action()) {
            let mut visited = FxHashSet::default();
            let mut path: SmallVec<[TileId; 8]> = SmallVec::new();
            let mut current = Some(tile.id());

            while let Some(id) = current {
                path.push(id);
                if !visited.insert(id) {
                    let chain: Vec<String> = path.iter().map(|t| t.0.to_string()).collect();
                    return Err(GameError::malformed(format!(
                        "jump cycle {}",
                        chain.join(" -> ")
                    )));
                }
                current = self.tiles[id.index()].action().map(TileAction::target);
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// The winning tile, or `None` for an empty board.
    #[must_use]
    pub fn terminal(&self) -> Option<&Tile> {
        self.tiles.last()
    }

    #[must_use]
    pub fn is_terminal(&self, id: TileId) -> bool {
        self.terminal().is_some_and(|t| t.id() == id)
    }

    /// Look up a tile by index.
    pub fn resolve(&self, index: usize) -> Result<&Tile> {
        self.tiles.get(index).ok_or(GameError::OutOfRange {
            index,
            len: self.tiles.len(),
        })
    }

    /// Where a player landing on `tile` ends up: the action's target, or the
    /// tile itself. Follows exactly one hop.
    pub fn apply_action(&self, tile: &Tile) -> Result<&Tile> {
        match tile.action() {
            Some(action) => self.resolve(action.target().index()),
            None => self.resolve(tile.id().index()),
        }
    }
}

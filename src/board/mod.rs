//! Board representation: tiles and the tile graph.
//!
//! A board is an ordered track of tiles numbered from 0. Some tiles carry an
//! action that moves a player again on landing (ladders and snakes in the
//! ladder game, teleports in Missing Diamond). The final tile is the
//! terminal tile; reaching it wins the game.
//!
//! ```
//! use ladder_games::board::{TileAction, TileGraph, TileId};
//!
//! let board = TileGraph::with_actions(10, [(2, TileAction::Jump(TileId::new(6)))]).unwrap();
//! let landed = board.resolve(2).unwrap();
//! assert_eq!(board.apply_action(landed).unwrap().id(), TileId::new(6));
//! ```

mod graph;
mod tile;

pub use graph::TileGraph;
pub use tile::{Tile, TileAction, TileId, TileSpec};

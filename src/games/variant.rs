//! Game variants and the builder that assembles an engine for them.

use serde::{Deserialize, Serialize};

use crate::board::{TileAction, TileGraph, TileId};
use crate::core::{GameError, GameRng, Player, PlayerColor, PlayerId, Result, RollSource};
use crate::dice::Die;
use crate::engine::{EntryRule, GameEngine};

/// The games in the suite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameVariant {
    /// Snakes-and-ladders: jumps in both directions, turn-marker entry.
    Ladder,
    /// Missing Diamond: teleport tiles, everyone enters immediately.
    MissingDiamond,
}

impl GameVariant {
    /// How players get onto the board in this variant.
    #[must_use]
    pub fn entry_rule(self) -> EntryRule {
        match self {
            GameVariant::Ladder => EntryRule::TurnMarker,
            GameVariant::MissingDiamond => EntryRule::Immediate,
        }
    }

    /// The tile action a board link becomes in this variant.
    #[must_use]
    pub fn link(self, target: TileId) -> TileAction {
        match self {
            GameVariant::Ladder => TileAction::Jump(target),
            GameVariant::MissingDiamond => TileAction::Teleport(target),
        }
    }

    /// Tile count of the standard board.
    #[must_use]
    pub fn standard_tiles(self) -> u32 {
        match self {
            GameVariant::Ladder => 100,
            GameVariant::MissingDiamond => 60,
        }
    }

    /// Links of the standard board as `(from, to)` pairs.
    #[must_use]
    pub fn standard_links(self) -> &'static [(u32, u32)] {
        match self {
            GameVariant::Ladder => &[
                // ladders
                (3, 21),
                (8, 30),
                (28, 84),
                (58, 77),
                (75, 86),
                (80, 98),
                // snakes
                (16, 6),
                (47, 25),
                (49, 11),
                (62, 19),
                (87, 24),
                (93, 73),
                (97, 78),
            ],
            GameVariant::MissingDiamond => &[(7, 31), (19, 44), (36, 12), (52, 27)],
        }
    }
}

impl std::fmt::Display for GameVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameVariant::Ladder => f.write_str("Ladder"),
            GameVariant::MissingDiamond => f.write_str("Missing Diamond"),
        }
    }
}

/// Builder for creating a game of either variant.
///
/// ```
/// use ladder_games::games::{GameBuilder, GameVariant};
///
/// let mut game = GameBuilder::new(GameVariant::MissingDiamond)
///     .standard_board()
///     .player("Ada")
///     .player("Bo")
///     .seed(7)
///     .build()
///     .unwrap();
/// game.start().unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct GameBuilder {
    variant: GameVariant,
    tiles: u32,
    links: Vec<(u32, u32)>,
    players: Vec<(String, Option<PlayerColor>)>,
    seed: Option<u64>,
}

impl GameBuilder {
    /// Start a builder with a plain board of the variant's standard size.
    pub fn new(variant: GameVariant) -> Self {
        Self {
            variant,
            tiles: variant.standard_tiles(),
            links: Vec::new(),
            players: Vec::new(),
            seed: None,
        }
    }

    /// Use the variant's standard board size and links.
    #[must_use]
    pub fn standard_board(mut self) -> Self {
        self.tiles = self.variant.standard_tiles();
        self.links = self.variant.standard_links().to_vec();
        self
    }

    #[must_use]
    pub fn tiles(mut self, count: u32) -> Self {
        self.tiles = count;
        self
    }

    /// Add a link from tile `from` to tile `to`.
    #[must_use]
    pub fn link(mut self, from: u32, to: u32) -> Self {
        self.links.push((from, to));
        self
    }

    /// Add a player with the next palette color.
    #[must_use]
    pub fn player(mut self, name: impl Into<String>) -> Self {
        self.players.push((name.into(), None));
        self
    }

    #[must_use]
    pub fn player_with_color(mut self, name: impl Into<String>, color: PlayerColor) -> Self {
        self.players.push((name.into(), Some(color)));
        self
    }

    /// Seed the die. Without a seed the die is seeded from entropy.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn variant(&self) -> GameVariant {
        self.variant
    }

    /// Build the game in `Setup`.
    ///
    /// Fails with `MalformedConfiguration` for a bad board, `OutOfRange` for a
    /// link starting off the board and `InvalidArgument` for bad players.
    pub fn build(self) -> Result<GameEngine> {
        let die = Die::new(match self.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        });
        self.build_with_die(die)
    }

    /// Build the game with an explicit die, ignoring any seed.
    pub fn build_with_die<R: RollSource>(self, die: Die<R>) -> Result<GameEngine<R>> {
        if self.players.len() > usize::from(u8::MAX) + 1 {
            return Err(GameError::invalid_argument(format!(
                "{} players given, at most 256 supported",
                self.players.len()
            )));
        }

        let variant = self.variant;
        let board = TileGraph::with_actions(
            self.tiles,
            self.links
                .iter()
                .map(|&(from, to)| (from, variant.link(TileId::new(to)))),
        )?;

        let players = self
            .players
            .into_iter()
            .enumerate()
            .map(|(seat, (name, color))| {
                let color = color.unwrap_or_else(|| PlayerColor::for_seat(seat));
                Player::new(PlayerId::new(seat as u8), name, color)
            })
            .collect::<Result<Vec<_>>>()?;

        GameEngine::with_die(board, players, die)?.with_entry_rule(variant.entry_rule())
    }
}

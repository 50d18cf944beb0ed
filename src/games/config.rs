//! Serializable game descriptions.
//!
//! This is the boundary where external collaborators (setup screens, map
//! files) hand a game to the engine. Every failure, I/O and parse errors
//! included, comes back as a [`GameError`] value.
//!
//! ```json
//! {
//!   "variant": "ladder",
//!   "tiles": 30,
//!   "links": [{ "from": 3, "to": 17 }, { "from": 25, "to": 9 }],
//!   "players": [{ "name": "Ada" }, { "name": "Bo", "color": "green" }],
//!   "seed": 42
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::variant::{GameBuilder, GameVariant};
use crate::core::{GameError, PlayerColor, Result};
use crate::engine::GameEngine;

/// A jump, snake or teleport between two tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkConfig {
    pub from: u32,
    pub to: u32,
}

/// A seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlayerConfig {
    pub name: String,
    /// Palette color for the seat when omitted.
    #[serde(default)]
    pub color: Option<PlayerColor>,
}

/// Complete description of a game session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    pub variant: GameVariant,

    /// Board size. Defaults to the variant's standard size.
    #[serde(default)]
    pub tiles: Option<u32>,

    /// Board links. An omitted list means the variant's standard links;
    /// an empty list means a plain track.
    #[serde(default)]
    pub links: Option<Vec<LinkConfig>>,

    pub players: Vec<PlayerConfig>,

    /// Die seed. Entropy-seeded when omitted.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Parse a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse a configuration from any reader.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|err| GameError::Config(format!("{}: {err}", path.display())))?;
        Self::from_reader(BufReader::new(file))
    }

    /// Serialize back to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// A builder primed with this configuration.
    #[must_use]
    pub fn to_builder(&self) -> GameBuilder {
        let mut builder = GameBuilder::new(self.variant);
        builder = match &self.links {
            None => builder.standard_board(),
            Some(links) => links
                .iter()
                .fold(builder, |b, link| b.link(link.from, link.to)),
        };
        if let Some(tiles) = self.tiles {
            builder = builder.tiles(tiles);
        }
        for player in &self.players {
            builder = match player.color {
                Some(color) => builder.player_with_color(player.name.clone(), color),
                None => builder.player(player.name.clone()),
            };
        }
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }
        builder
    }

    /// Build the described game in `Setup`.
    pub fn build(&self) -> Result<GameEngine> {
        self.to_builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{TileAction, TileId};
    use crate::engine::EntryRule;

    const LADDER: &str = r#"{
        "variant": "ladder",
        "tiles": 30,
        "links": [{ "from": 3, "to": 17 }, { "from": 25, "to": 9 }],
        "players": [{ "name": "Ada" }, { "name": "Bo", "color": "green" }],
        "seed": 42
    }"#;

    #[test]
    fn test_parse_and_build() {
        let config = GameConfig::from_json(LADDER).unwrap();
        assert_eq!(config.variant, GameVariant::Ladder);
        assert_eq!(config.players[1].color, Some(PlayerColor::Green));

        let game = config.build().unwrap();
        assert_eq!(game.board().len(), 30);
        assert_eq!(game.entry_rule(), EntryRule::TurnMarker);
        assert_eq!(
            game.board().resolve(25).unwrap().action(),
            Some(TileAction::Jump(TileId::new(9)))
        );
        assert_eq!(game.players()[0].color(), PlayerColor::Red);
        assert_eq!(game.players()[1].name(), "Bo");
    }

    #[test]
    fn test_defaults_to_standard_board() {
        let config = GameConfig::from_json(
            r#"{ "variant": "missing_diamond", "players": [{ "name": "A" }, { "name": "B" }] }"#,
        )
        .unwrap();
        let game = config.build().unwrap();
        assert_eq!(game.board().len(), 60);
        assert_eq!(
            game.board().resolve(7).unwrap().action(),
            Some(TileAction::Teleport(TileId::new(31)))
        );
    }

    #[test]
    fn test_empty_links_means_plain_track() {
        let config = GameConfig::from_json(
            r#"{ "variant": "ladder", "tiles": 12, "links": [], "players": [{ "name": "A" }] }"#,
        )
        .unwrap();
        let game = config.build().unwrap();
        assert!(game.board().tiles().iter().all(|t| !t.has_action()));
    }

    #[test]
    fn test_bad_json_is_config_error() {
        assert!(matches!(GameConfig::from_json("{"), Err(GameError::Config(_))));
        assert!(matches!(
            GameConfig::from_json(r#"{ "variant": "chess", "players": [] }"#),
            Err(GameError::Config(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "variant": "ladder", "players": [], "extra": 1 }"#),
            Err(GameError::Config(_))
        ));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, GameError::Config(msg) if msg.contains("not/here.json")));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = GameConfig::from_json(LADDER).unwrap();
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }
}

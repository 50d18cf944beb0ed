//! Error type shared by every engine component.
//!
//! All failures are reported synchronously at the point of violation.
//! Nothing in the engine retries or silently recovers.

use thiserror::Error;

use crate::observers::ObserverError;

/// Errors raised by the die, the tile graph, players and the turn controller.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// A caller supplied a value outside its legal domain
    /// (die face outside 1-6, duplicate player id, empty name).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A tile index does not exist on the board.
    #[error("tile index {index} is out of range (board has {len} tiles)")]
    OutOfRange { index: usize, len: usize },

    /// An operation was requested in a lifecycle state that forbids it.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The board description cannot be turned into a playable tile graph.
    #[error("malformed configuration: {0}")]
    MalformedConfiguration(String),

    /// A registered observer reported a failure. The notification sequence
    /// was aborted; mutations applied before the call remain applied.
    #[error("observer failed: {0}")]
    Observer(#[from] ObserverError),

    /// A game description could not be read or parsed.
    #[error("could not load game configuration: {0}")]
    Config(String),
}

impl GameError {
    pub(crate) fn invalid_state(msg: impl Into<String>) -> Self {
        GameError::InvalidState(msg.into())
    }

    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        GameError::InvalidArgument(msg.into())
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        GameError::MalformedConfiguration(msg.into())
    }
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::Config(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GameError>;

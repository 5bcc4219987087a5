//! Session configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! start_fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
//! fifty_move_limit = 50
//! repetition_count = 3
//! repetition_min_history = 5
//! ```

use arbiter_core::{Color, Fen, FenError, Piece, PieceKind};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::Position;

/// Errors that can occur when loading or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    /// The file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The starting position is not valid FEN.
    #[error("invalid start position: {0}")]
    Fen(#[from] FenError),
    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunable limits for a game session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Position a new or reset session starts from.
    #[serde(default = "default_start_fen")]
    pub start_fen: String,
    /// Halfmoves without a capture or pawn move before the game is drawn.
    #[serde(default = "default_fifty_move_limit")]
    pub fifty_move_limit: u32,
    /// Times one board and side to move must occur for a repetition draw.
    #[serde(default = "default_repetition_count")]
    pub repetition_count: usize,
    /// Recorded positions required before repetition is checked at all.
    #[serde(default = "default_repetition_min_history")]
    pub repetition_min_history: usize,
}

fn default_start_fen() -> String {
    Fen::STARTPOS.to_string()
}

fn default_fifty_move_limit() -> u32 {
    50
}

fn default_repetition_count() -> usize {
    3
}

fn default_repetition_min_history() -> usize {
    5
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            start_fen: default_start_fen(),
            fifty_move_limit: default_fifty_move_limit(),
            repetition_count: default_repetition_count(),
            repetition_min_history: default_repetition_min_history(),
        }
    }
}

impl SessionConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded session config");
        Ok(config)
    }

    /// Checks limits and that the start position has one king per side.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.check_limits()?;
        self.start_position().map(|_| ())
    }

    pub(crate) fn check_limits(&self) -> Result<(), ConfigError> {
        if self.fifty_move_limit == 0 {
            return Err(ConfigError::Invalid("fifty_move_limit must be positive".into()));
        }
        if self.repetition_count == 0 {
            return Err(ConfigError::Invalid("repetition_count must be positive".into()));
        }
        Ok(())
    }

    /// The configured start position.
    pub fn start_position(&self) -> Result<Position, ConfigError> {
        let position = Position::from_fen(&self.start_fen)?;
        check_kings(&position)?;
        Ok(position)
    }
}

/// A playable start has exactly one king per side.
pub(crate) fn check_kings(position: &Position) -> Result<(), ConfigError> {
    for color in Color::BOTH {
        let king = Piece::new(color, PieceKind::King);
        let kings = position.pieces().filter(|&(_, p)| p == king).count();
        if kings != 1 {
            return Err(ConfigError::Invalid(format!(
                "start position has {} {} kings",
                kings, color
            )));
        }
    }
    Ok(())
}

//! Game status and the rules that end a game.
//!
//! The only win is capturing the opposing king; check never ends a game on
//! its own. Draws are detected by [`TerminalEvaluator`] after every move.

mod terminal;

pub use terminal::{is_insufficient_material, is_stalemate, TerminalEvaluator};

use arbiter_core::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a game. Once it leaves `Active` it never returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Active,
    /// The given color captured the opposing king.
    Won(Color),
    Draw(DrawReason),
}

impl GameStatus {
    #[inline]
    pub const fn is_active(self) -> bool {
        matches!(self, GameStatus::Active)
    }

    #[inline]
    pub const fn is_terminal(self) -> bool {
        !self.is_active()
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Active => f.write_str("active"),
            GameStatus::Won(color) => write!(f, "{} wins", color),
            GameStatus::Draw(reason) => write!(f, "draw by {}", reason),
        }
    }
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrawReason {
    /// The halfmove clock reached the configured limit.
    FiftyMoveRule,
    /// The same board and side to move occurred the configured number of times.
    Repetition,
    /// Side to move is not in check and has no legal move.
    Stalemate,
    /// One of the few bare-material endings the engine recognizes.
    InsufficientMaterial,
    /// Both players agreed.
    Agreement,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DrawReason::FiftyMoveRule => "fifty-move rule",
            DrawReason::Repetition => "repetition",
            DrawReason::Stalemate => "stalemate",
            DrawReason::InsufficientMaterial => "insufficient material",
            DrawReason::Agreement => "agreement",
        };
        f.write_str(text)
    }
}

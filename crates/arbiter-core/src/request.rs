//! Move requests issued by the host.

use crate::{PieceKind, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A proposed move: origin, destination and, for a pawn reaching the far
/// rank, an optional promotion choice.
///
/// A request carries no flags; the engine works out castling, en passant
/// and promotion from the position it is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceKind>,
}

impl MoveRequest {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        MoveRequest {
            from,
            to,
            promotion: None,
        }
    }

    /// Returns the same request with a promotion choice attached.
    #[inline]
    pub const fn with_promotion(self, kind: PieceKind) -> Self {
        MoveRequest {
            promotion: Some(kind),
            ..self
        }
    }

    /// Parses long algebraic (UCI) text: "e2e4", "e7e8q".
    pub fn from_uci(s: &str) -> Option<Self> {
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        let promotion = match s[4..].chars().next() {
            Some(c) => Some(PieceKind::from_letter(c)?),
            None => None,
        };
        Some(MoveRequest {
            from,
            to,
            promotion,
        })
    }

    pub fn to_uci(self) -> String {
        match self.promotion {
            Some(kind) => format!("{}{}{}", self.from, self.to, kind.letter()),
            None => format!("{}{}", self.from, self.to),
        }
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uci())
    }
}

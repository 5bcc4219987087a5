//! Rejection types returned by the session.
//!
//! None of these are fatal: every error means "nothing happened" and the
//! session is left exactly as it was.

use arbiter_core::{PieceKind, Square};
use thiserror::Error;

/// Why a proposed move was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("the game has already ended")]
    GameOver,

    #[error("a promotion choice is still pending")]
    PromotionPending,

    #[error("no piece on {0}")]
    NoPiece(Square),

    #[error("the piece on {0} does not belong to the side to move")]
    WrongSide(Square),

    #[error("{0} is occupied by the mover's own piece")]
    OwnPiece(Square),

    #[error("illegal move from {from} to {to}")]
    Illegal { from: Square, to: Square },

    #[error("malformed move: {0}")]
    Malformed(String),

    #[error("cannot promote to {0}")]
    InvalidPromotionChoice(PieceKind),
}

/// Why a promotion choice was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PromotionError {
    #[error("no promotion is pending")]
    NotPending,

    #[error("cannot promote to {0}")]
    InvalidChoice(PieceKind),
}

/// Why a draw offer operation did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DrawOfferError {
    #[error("the game has already ended")]
    GameOver,

    #[error("a draw has already been offered")]
    AlreadyOffered,

    #[error("no draw has been offered")]
    NotOffered,

    #[error("a promotion choice is still pending")]
    PromotionPending,
}

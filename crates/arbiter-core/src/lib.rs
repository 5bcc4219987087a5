//! Core types for the chess arbiter.
//!
//! This crate holds the plain values the rules engine passes around:
//! - [`Color`], [`PieceKind`] and [`Piece`] for piece representation
//! - [`Square`] for board coordinates
//! - [`MoveRequest`] for a host's proposed move
//! - FEN reading and writing via [`Fen`]
//!
//! Nothing here knows the rules of the game; see `arbiter-engine` for that.

mod color;
mod fen;
mod piece;
mod request;
mod square;

pub use color::Color;
pub use fen::{Fen, FenError};
pub use piece::{Piece, PieceKind};
pub use request::MoveRequest;
pub use square::{InvalidSquare, Square};

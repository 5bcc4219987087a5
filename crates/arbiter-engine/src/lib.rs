//! Two-player chess rules engine.
//!
//! This crate provides:
//! - [`Position`] - the board plus castling, en-passant, clock and status state
//! - [`GameSession`] - the host-facing game with history, promotion and draw offers
//! - [`movegen`] - attack detection, move validation and execution
//! - [`rules`] - game status and terminal-state evaluation
//! - [`SessionConfig`] - tunable limits, loadable from TOML
//!
//! # Rules
//!
//! Moves are validated for pseudo-legality only. A player may leave their
//! king attacked; the game is won by actually capturing the enemy king.
//! Check matters only for castling and for telling stalemate apart.
//! Draws come from the halfmove limit, repetition, stalemate, a few dead
//! material endings, or agreement.
//!
//! # Example
//!
//! ```
//! use arbiter_engine::{GameSession, GameStatus, MoveOutcome};
//!
//! let mut game = GameSession::new();
//! game.propose_uci("e2e4").unwrap();
//! let outcome = game.propose_uci("e7e5").unwrap();
//! assert_eq!(outcome, MoveOutcome::Applied(GameStatus::Active));
//! println!("Position after 1.e4 e5: {}", game.position().to_fen());
//! ```

mod config;
mod error;
mod game;
mod history;
pub mod movegen;
mod position;
pub mod rules;

pub use arbiter_core::{Color, MoveRequest, Piece, PieceKind, Square};
pub use config::{ConfigError, SessionConfig};
pub use error::{DrawOfferError, MoveError, PromotionError};
pub use game::{GameSession, MoveOutcome, PendingPromotion};
pub use history::MoveHistory;
pub use movegen::{apply_move, is_king_in_check, is_square_attacked, MoveEffects};
pub use position::{CastleSide, CastlingRights, EnPassantTarget, Fingerprint, Position};
pub use rules::{DrawReason, GameStatus, TerminalEvaluator};

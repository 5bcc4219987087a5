//! Detection of finished games.

use arbiter_core::{Color, PieceKind, Square};

use super::{DrawReason, GameStatus};
use crate::config::SessionConfig;
use crate::history::MoveHistory;
use crate::movegen::{has_legal_move, is_king_in_check};
use crate::Position;

/// Decides whether a game has ended after a completed move.
///
/// Checks run in a fixed order and the first match wins: king capture,
/// halfmove limit, repetition, stalemate, insufficient material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalEvaluator {
    /// Halfmoves without capture or pawn move that end the game.
    pub fifty_move_limit: u32,
    /// Occurrences of one fingerprint that end the game.
    pub repetition_count: usize,
    /// History length below which repetition is never declared.
    pub repetition_min_history: usize,
}

impl Default for TerminalEvaluator {
    fn default() -> Self {
        Self::from(&SessionConfig::default())
    }
}

impl From<&SessionConfig> for TerminalEvaluator {
    fn from(config: &SessionConfig) -> Self {
        TerminalEvaluator {
            fifty_move_limit: config.fifty_move_limit,
            repetition_count: config.repetition_count,
            repetition_min_history: config.repetition_min_history,
        }
    }
}

impl TerminalEvaluator {
    /// Status of `position` given the history that ends with it.
    ///
    /// The caller records the position's fingerprint in `history` first.
    pub fn evaluate(&self, position: &Position, history: &MoveHistory) -> GameStatus {
        if position.status().is_terminal() {
            return position.status();
        }
        if position.halfmove_clock() >= self.fifty_move_limit {
            tracing::trace!(clock = position.halfmove_clock(), "halfmove limit reached");
            return GameStatus::Draw(DrawReason::FiftyMoveRule);
        }
        if self.is_repetition(history) {
            tracing::trace!(plies = history.len(), "position repeated");
            return GameStatus::Draw(DrawReason::Repetition);
        }
        if is_stalemate(position) {
            tracing::trace!(side = %position.side_to_move(), "side to move is stalemated");
            return GameStatus::Draw(DrawReason::Stalemate);
        }
        if is_insufficient_material(position) {
            tracing::trace!("insufficient material");
            return GameStatus::Draw(DrawReason::InsufficientMaterial);
        }
        GameStatus::Active
    }

    /// True if the latest fingerprint has occurred often enough.
    pub fn is_repetition(&self, history: &MoveHistory) -> bool {
        if history.len() < self.repetition_min_history {
            return false;
        }
        history
            .last()
            .is_some_and(|current| history.occurrences(current) >= self.repetition_count)
    }
}

/// Side to move is not in check and has no legal move.
///
/// Candidate moves are simulated on copies; `position` is never modified.
pub fn is_stalemate(position: &Position) -> bool {
    let side = position.side_to_move();
    !is_king_in_check(position, side) && !has_legal_move(position)
}

/// The recognized dead endings: bare kings, a lone minor piece, or one
/// bishop each on squares of the same color. Other drawn material
/// (two knights, for instance) is not detected.
pub fn is_insufficient_material(position: &Position) -> bool {
    let mut material: [Vec<(PieceKind, Square)>; 2] = [Vec::new(), Vec::new()];
    for (sq, piece) in position.pieces() {
        if piece.kind != PieceKind::King {
            material[piece.color.index()].push((piece.kind, sq));
        }
    }

    let white = material[Color::White.index()].as_slice();
    let black = material[Color::Black.index()].as_slice();
    match (white, black) {
        ([], []) => true,
        ([(PieceKind::Knight | PieceKind::Bishop, _)], [])
        | ([], [(PieceKind::Knight | PieceKind::Bishop, _)]) => true,
        ([(PieceKind::Bishop, a)], [(PieceKind::Bishop, b)]) => a.parity() == b.parity(),
        _ => false,
    }
}

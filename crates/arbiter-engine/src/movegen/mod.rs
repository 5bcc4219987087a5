//! Move validation, attack detection and execution.
//!
//! The board is small and positions are copied freely, so legal-move
//! enumeration simply tries every destination for every piece of the side
//! to move and simulates each candidate on a scratch copy.

mod attacks;
mod execute;
mod validate;

use arbiter_core::{Color, MoveRequest, PieceKind, Square};

use crate::Position;

pub use attacks::{attackers, is_king_in_check, is_square_attacked};
pub use execute::{apply_move, finish_promotion, MoveEffects};
pub use validate::{castle_side, check_move, is_pseudo_legal, ValidationMode};

/// Returns true if the move is pseudo-legal for the side to move and does
/// not leave the mover's own king attacked.
pub fn is_legal(position: &Position, from: Square, to: Square) -> bool {
    if !is_pseudo_legal(position, from, to, ValidationMode::Play) {
        return false;
    }
    let mover = position.side_to_move();
    // Promotion choice cannot change whether the mover's king is attacked.
    let (scratch, _) = execute::apply_unchecked(position, MoveRequest::new(from, to));
    !is_king_in_check(&scratch, mover)
}

/// All legal moves for the side to move.
///
/// Moves onto the promotion rank are listed once, without a choice.
pub fn legal_moves(position: &Position) -> Vec<MoveRequest> {
    candidates(position)
        .filter(|m| is_legal(position, m.from, m.to))
        .collect()
}

/// Returns true if the side to move has at least one legal move.
pub fn has_legal_move(position: &Position) -> bool {
    candidates(position).any(|m| is_legal(position, m.from, m.to))
}

/// Legal destinations for the piece on `from`, for move highlighting.
pub fn legal_targets(position: &Position, from: Square) -> Vec<Square> {
    Square::all()
        .filter(|&to| is_legal(position, from, to))
        .collect()
}

fn candidates(position: &Position) -> impl Iterator<Item = MoveRequest> + '_ {
    let side: Color = position.side_to_move();
    position
        .pieces()
        .filter(move |(_, piece)| piece.color == side)
        .flat_map(|(from, _)| Square::all().map(move |to| MoveRequest::new(from, to)))
}

/// Returns true if a pawn move from `from` to `to` would need a promotion choice.
pub fn is_promotion(position: &Position, from: Square, to: Square) -> bool {
    position
        .piece_at(from)
        .is_some_and(|p| p.kind == PieceKind::Pawn && to.rank() == p.color.promotion_rank())
}

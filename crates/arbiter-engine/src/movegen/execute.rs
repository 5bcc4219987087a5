//! Move execution.
//!
//! Executing never touches the input position: it returns a new one plus a
//! record of the side effects a host may want to animate or announce.

use arbiter_core::{MoveRequest, Piece, PieceKind, Square};

use super::validate::{check_move, is_en_passant, ValidationMode};
use crate::error::MoveError;
use crate::position::{CastleSide, EnPassantTarget, Position};
use crate::rules::GameStatus;

/// Side effects of an executed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveEffects {
    /// Piece removed from the board, including an en-passant victim.
    pub captured: Option<Piece>,
    /// Set when the king castled and its rook was relocated.
    pub castled: Option<CastleSide>,
    /// Square of a pawn removed by en passant (not the destination).
    pub en_passant_capture: Option<Square>,
    /// The pawn reached the far rank without a promotion choice.
    pub promotion_pending: bool,
    /// Piece a pawn promoted to, when the choice came with the request.
    pub promoted: Option<PieceKind>,
}

impl MoveEffects {
    /// True if the opposing king was captured.
    pub fn king_captured(&self) -> bool {
        self.captured.is_some_and(|p| p.kind == PieceKind::King)
    }
}

/// Validates `request` for the side to move and applies it.
///
/// Rejection happens before any work is done, so an error always leaves
/// the caller with nothing to undo.
pub fn apply_move(
    position: &Position,
    request: MoveRequest,
) -> Result<(Position, MoveEffects), MoveError> {
    if position.status().is_terminal() {
        return Err(MoveError::GameOver);
    }
    if let Some(kind) = request.promotion.filter(|k| !k.is_promotion_choice()) {
        return Err(MoveError::InvalidPromotionChoice(kind));
    }
    check_move(position, request.from, request.to, ValidationMode::Play)?;
    if let Some(kind) = request.promotion {
        if !super::is_promotion(position, request.from, request.to) {
            return Err(MoveError::InvalidPromotionChoice(kind));
        }
    }
    Ok(apply_unchecked(position, request))
}

/// Applies a move already known to be pseudo-legal.
pub(crate) fn apply_unchecked(position: &Position, request: MoveRequest) -> (Position, MoveEffects) {
    let MoveRequest { from, to, promotion } = request;
    let mut next = position.clone();
    let mut effects = MoveEffects::default();
    let Some(piece) = position.piece_at(from) else {
        return (next, effects);
    };
    let mover = piece.color;
    let target = position.piece_at(to);
    let file_delta = to.file() as i8 - from.file() as i8;
    let rank_delta = to.rank() as i8 - from.rank() as i8;

    // Capturing the king is the only way to win.
    if let Some(captured) = target {
        effects.captured = Some(captured);
        if captured.kind == PieceKind::King {
            next.set_status(GameStatus::Won(mover));
        }
    }

    if piece.kind == PieceKind::King && file_delta.abs() == 2 {
        let side = if file_delta > 0 {
            CastleSide::Kingside
        } else {
            CastleSide::Queenside
        };
        let rank = from.rank();
        if let (Some(rook_from), Some(rook_to)) = (
            Square::new(side.rook_file(), rank),
            Square::new(side.rook_target_file(), rank),
        ) {
            if let Some(rook) = next.take(rook_from) {
                next.put(rook_to, rook);
                effects.castled = Some(side);
            }
        }
    }

    match piece.kind {
        PieceKind::King => next.castling_mut().mark_king_moved(mover),
        PieceKind::Rook if from.rank() == mover.back_rank() => {
            if let Some(side) = CastleSide::from_rook_file(from.file()) {
                next.castling_mut().revoke(mover, side);
            }
        }
        _ => {}
    }
    // A rook taken on its corner can no longer castle either.
    if let Some(captured) = target.filter(|p| p.kind == PieceKind::Rook) {
        if to.rank() == captured.color.back_rank() {
            if let Some(side) = CastleSide::from_rook_file(to.file()) {
                next.castling_mut().revoke(captured.color, side);
            }
        }
    }

    if piece.kind == PieceKind::Pawn && is_en_passant(position, mover, from, to) {
        if let Some(victim) = Square::new(to.file(), from.rank()) {
            effects.captured = next.take(victim);
            effects.en_passant_capture = Some(victim);
        }
    }

    if effects.captured.is_some() || piece.kind == PieceKind::Pawn {
        next.set_halfmove_clock(0);
    } else {
        next.set_halfmove_clock(position.halfmove_clock().saturating_add(1));
    }

    let double_advance = piece.kind == PieceKind::Pawn && rank_delta.abs() == 2;
    next.set_en_passant(if double_advance {
        from.offset(0, mover.pawn_direction())
            .map(|square| EnPassantTarget {
                square,
                pawn_color: mover,
            })
    } else {
        None
    });

    next.take(from);
    let promoting = piece.kind == PieceKind::Pawn && to.rank() == mover.promotion_rank();
    match (promoting, promotion) {
        (true, Some(kind)) => {
            next.put(to, Piece::new(mover, kind));
            effects.promoted = Some(kind);
        }
        (true, None) => {
            // The pawn holds the square until the host picks a piece.
            next.put(to, piece);
            effects.promotion_pending = true;
        }
        (false, _) => next.put(to, piece),
    }

    next.bump_fullmove_count();
    if !effects.promotion_pending {
        next.flip_side_to_move();
    }
    (next, effects)
}

/// Completes a pending promotion: swaps the waiting pawn on `square` for
/// `kind` and hands the turn over.
pub fn finish_promotion(position: &Position, square: Square, kind: PieceKind) -> Position {
    let mut next = position.clone();
    if let Some(pawn) = position.piece_at(square) {
        next.put(square, Piece::new(pawn.color, kind));
    }
    next.flip_side_to_move();
    next
}

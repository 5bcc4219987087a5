//! Pseudo-legal move validation.
//!
//! A move is pseudo-legal when it follows the moving piece's geometry,
//! is not obstructed, and does not land on a friendly piece. Whether the
//! mover's own king is left attacked is not considered here.

use arbiter_core::{Color, Piece, PieceKind, Square};

use super::attacks::{is_king_in_check, is_square_attacked};
use crate::error::MoveError;
use crate::position::{CastleSide, Position, KING_START_FILE};

/// How much of the rulebook a validation query applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// A real move by the side to move: every rule applies.
    Play,
    /// "Could this piece strike that square?" as asked by attack detection.
    ///
    /// Side to move is ignored, castling and en passant are never
    /// considered, and the probed square counts as holding an enemy piece,
    /// so a pawn reaches it only diagonally.
    Probe,
}

/// Returns true if moving the piece on `from` to `to` is pseudo-legal.
pub fn is_pseudo_legal(position: &Position, from: Square, to: Square, mode: ValidationMode) -> bool {
    check_move(position, from, to, mode).is_ok()
}

/// Checks a move against the per-piece rules, reporting why it fails.
pub fn check_move(
    position: &Position,
    from: Square,
    to: Square,
    mode: ValidationMode,
) -> Result<(), MoveError> {
    let piece = position.piece_at(from).ok_or(MoveError::NoPiece(from))?;
    if mode == ValidationMode::Play && piece.color != position.side_to_move() {
        return Err(MoveError::WrongSide(from));
    }
    if from == to {
        return Err(MoveError::Illegal { from, to });
    }

    let target = position.piece_at(to);
    if mode == ValidationMode::Play && target.is_some_and(|t| t.color == piece.color) {
        return Err(MoveError::OwnPiece(to));
    }
    let enemy_on_target = match mode {
        ValidationMode::Play => target.is_some(),
        ValidationMode::Probe => true,
    };

    let (df, dr) = delta(from, to);
    let ok = match piece.kind {
        PieceKind::Pawn => pawn_move(position, piece.color, from, to, enemy_on_target, mode),
        PieceKind::Knight => is_knight_delta(df, dr),
        PieceKind::Bishop => is_diagonal(df, dr) && path_clear(position, from, to),
        PieceKind::Rook => is_orthogonal(df, dr) && path_clear(position, from, to),
        PieceKind::Queen => {
            (is_diagonal(df, dr) || is_orthogonal(df, dr)) && path_clear(position, from, to)
        }
        PieceKind::King => {
            (df.abs() <= 1 && dr.abs() <= 1)
                || (mode == ValidationMode::Play
                    && castle_side(position, piece.color, from, to).is_some())
        }
    };

    if ok {
        Ok(())
    } else {
        Err(MoveError::Illegal { from, to })
    }
}

/// Castling side for a king move from `from` to `to`, if castling is allowed.
///
/// Requires: king on its home square with no recorded king move, the rook
/// right still held and that rook on its corner, every square between them
/// empty, the king not in check, and neither the crossed nor the landing
/// square attacked.
pub fn castle_side(position: &Position, color: Color, from: Square, to: Square) -> Option<CastleSide> {
    let rank = color.back_rank();
    if from != Square::new(KING_START_FILE, rank)? || to.rank() != rank {
        return None;
    }
    let side = match to.file() {
        f if f == CastleSide::Kingside.king_target_file() => CastleSide::Kingside,
        f if f == CastleSide::Queenside.king_target_file() => CastleSide::Queenside,
        _ => return None,
    };
    if !position.castling().can_castle(color, side) {
        return None;
    }

    let rook_square = Square::new(side.rook_file(), rank)?;
    if position.piece_at(rook_square) != Some(Piece::new(color, PieceKind::Rook)) {
        return None;
    }
    if !path_clear(position, from, rook_square) {
        return None;
    }
    if is_king_in_check(position, color) {
        return None;
    }

    let crossed = Square::new(side.rook_target_file(), rank)?;
    if is_square_attacked(position, crossed, color) || is_square_attacked(position, to, color) {
        return None;
    }
    Some(side)
}

fn pawn_move(
    position: &Position,
    color: Color,
    from: Square,
    to: Square,
    enemy_on_target: bool,
    mode: ValidationMode,
) -> bool {
    let (df, dr) = delta(from, to);
    // Ranks advanced toward the promotion rank.
    let forward = dr * color.pawn_direction();
    let playing = mode == ValidationMode::Play;

    match (df.abs(), forward) {
        (0, 1) => playing && position.piece_at(to).is_none(),
        (0, 2) => {
            playing
                && from.rank() == color.pawn_start_rank()
                && path_clear(position, from, to)
                && position.piece_at(to).is_none()
        }
        (1, 1) => enemy_on_target || (playing && is_en_passant(position, color, from, to)),
        _ => false,
    }
}

/// Diagonal pawn step onto the recorded en-passant square, capturing the
/// enemy pawn that just advanced past it.
pub(crate) fn is_en_passant(position: &Position, color: Color, from: Square, to: Square) -> bool {
    let Some(target) = position.en_passant() else {
        return false;
    };
    if target.square != to || target.pawn_color == color || position.piece_at(to).is_some() {
        return false;
    }
    // The victim stands beside the capturing pawn, on the destination file.
    let victim = Square::new(to.file(), from.rank());
    victim.and_then(|sq| position.piece_at(sq)) == Some(Piece::new(target.pawn_color, PieceKind::Pawn))
}

#[inline]
fn delta(from: Square, to: Square) -> (i8, i8) {
    (
        to.file() as i8 - from.file() as i8,
        to.rank() as i8 - from.rank() as i8,
    )
}

#[inline]
fn is_knight_delta(df: i8, dr: i8) -> bool {
    matches!((df.abs(), dr.abs()), (1, 2) | (2, 1))
}

#[inline]
fn is_diagonal(df: i8, dr: i8) -> bool {
    df != 0 && df.abs() == dr.abs()
}

#[inline]
fn is_orthogonal(df: i8, dr: i8) -> bool {
    (df == 0) != (dr == 0)
}

/// True if every square strictly between `from` and `to` is empty.
///
/// Walks with unit steps, so callers must only pass squares sharing a
/// rank, file or diagonal.
fn path_clear(position: &Position, from: Square, to: Square) -> bool {
    let (df, dr) = delta(from, to);
    let (step_f, step_r) = (df.signum(), dr.signum());
    let mut current = from.offset(step_f, step_r);
    while let Some(sq) = current {
        if sq == to {
            return true;
        }
        if position.piece_at(sq).is_some() {
            return false;
        }
        current = sq.offset(step_f, step_r);
    }
    false
}

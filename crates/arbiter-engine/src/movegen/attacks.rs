//! Attack detection.
//!
//! A square is attacked when some enemy piece could move onto it. Each
//! probe runs the validator in [`ValidationMode::Probe`], which never
//! considers castling, so castling legality (which asks about attacks)
//! cannot recurse back into itself.

use arbiter_core::{Color, Square};

use super::validate::{is_pseudo_legal, ValidationMode};
use crate::Position;

/// Returns true if any piece not of `defender`'s color attacks `square`.
pub fn is_square_attacked(position: &Position, square: Square, defender: Color) -> bool {
    attackers(position, square, defender).next().is_some()
}

/// Squares of enemy pieces that attack `square`.
pub fn attackers(
    position: &Position,
    square: Square,
    defender: Color,
) -> impl Iterator<Item = Square> + '_ {
    position
        .pieces()
        .filter(move |(_, piece)| piece.color != defender)
        .filter(move |&(from, _)| is_pseudo_legal(position, from, square, ValidationMode::Probe))
        .map(|(from, _)| from)
}

/// Returns true if `color`'s king stands on an attacked square.
///
/// A side whose king has been captured is not "in check".
pub fn is_king_in_check(position: &Position, color: Color) -> bool {
    position
        .king_square(color)
        .is_some_and(|king| is_square_attacked(position, king, color))
}

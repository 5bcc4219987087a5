//! FEN (Forsyth-Edwards Notation) reading and writing.
//!
//! The engine uses FEN for fixtures and for handing a host a compact
//! snapshot. [`Fen`] holds the six fields already typed; turning them into
//! an engine position (castling flags, en-passant bookkeeping) is the
//! engine's job.

use crate::{Color, Piece, Square};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 fields, got {0}")]
    FieldCount(usize),

    #[error("invalid piece placement: {0}")]
    Placement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    ActiveColor(String),

    #[error("invalid castling rights: {0}")]
    Castling(String),

    #[error("invalid en passant square: {0}")]
    EnPassant(String),

    #[error("invalid halfmove clock: {0}")]
    HalfmoveClock(String),

    #[error("invalid move count: {0}")]
    MoveCount(String),
}

/// A parsed FEN record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    /// Board indexed by [`Square::index`].
    pub board: [Option<Piece>; 64],
    pub side_to_move: Color,
    /// Castling letters in "KQkq" order, or empty for "-".
    pub castling: String,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub move_count: u32,
}

impl Fen {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        let &[placement, active, castling, en_passant, halfmove, moves] = fields.as_slice() else {
            return Err(FenError::FieldCount(fields.len()));
        };

        let board = parse_placement(placement)?;

        let side_to_move = match active {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::ActiveColor(other.to_string())),
        };

        let castling = parse_castling(castling)?;

        let en_passant = match en_passant {
            "-" => None,
            text => match Square::from_algebraic(text) {
                Some(sq) if sq.rank() == 2 || sq.rank() == 5 => Some(sq),
                _ => return Err(FenError::EnPassant(text.to_string())),
            },
        };

        let halfmove_clock = halfmove
            .parse::<u32>()
            .map_err(|_| FenError::HalfmoveClock(halfmove.to_string()))?;
        let move_count = moves
            .parse::<u32>()
            .map_err(|_| FenError::MoveCount(moves.to_string()))?;

        Ok(Fen {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            move_count,
        })
    }
}

fn parse_placement(placement: &str) -> Result<[Option<Piece>; 64], FenError> {
    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != 8 {
        return Err(FenError::Placement(format!(
            "expected 8 ranks, got {}",
            rows.len()
        )));
    }

    let mut board = [None; 64];
    // FEN lists rank 8 first.
    for (row, text) in rows.iter().enumerate() {
        let rank = 7 - row as u8;
        let mut file = 0u8;
        for c in text.chars() {
            if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                file += skip as u8;
            } else if let Some(piece) = Piece::from_fen_char(c) {
                if let Some(sq) = Square::new(file, rank) {
                    board[sq.index()] = Some(piece);
                }
                file += 1;
            } else {
                return Err(FenError::Placement(format!(
                    "invalid character '{}' in rank {}",
                    c,
                    rank + 1
                )));
            }
            if file > 8 {
                break;
            }
        }
        if file != 8 {
            return Err(FenError::Placement(format!(
                "rank {} does not describe 8 squares",
                rank + 1
            )));
        }
    }
    Ok(board)
}

fn parse_castling(field: &str) -> Result<String, FenError> {
    if field == "-" {
        return Ok(String::new());
    }
    let mut seen = String::new();
    for c in field.chars() {
        if !"KQkq".contains(c) || seen.contains(c) {
            return Err(FenError::Castling(field.to_string()));
        }
        seen.push(c);
    }
    // Normalize to KQkq order.
    Ok("KQkq".chars().filter(|c| seen.contains(*c)).collect())
}

impl FromStr for Fen {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fen::parse(s)
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                let piece = Square::new(file, rank).and_then(|sq| self.board[sq.index()]);
                match piece {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{}", empty)?;
                            empty = 0;
                        }
                        write!(f, "{}", piece.to_fen_char())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{}", empty)?;
            }
            if rank > 0 {
                f.write_str("/")?;
            }
        }

        let castling = if self.castling.is_empty() {
            "-"
        } else {
            self.castling.as_str()
        };
        let en_passant = self
            .en_passant
            .map_or_else(|| "-".to_string(), Square::to_algebraic);

        write!(
            f,
            " {} {} {} {} {}",
            self.side_to_move.fen_char(),
            castling,
            en_passant,
            self.halfmove_clock,
            self.move_count
        )
    }
}

//! Board position and the state the special rules depend on.

use arbiter_core::{Color, Fen, FenError, Piece, PieceKind, Square};

use crate::rules::GameStatus;

/// Which rook a castling move uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    /// File of the rook's starting corner.
    #[inline]
    pub const fn rook_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 7,
            CastleSide::Queenside => 0,
        }
    }

    /// File the king lands on.
    #[inline]
    pub const fn king_target_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 6,
            CastleSide::Queenside => 2,
        }
    }

    /// File the rook lands on, the square the king passes through.
    #[inline]
    pub const fn rook_target_file(self) -> u8 {
        match self {
            CastleSide::Kingside => 5,
            CastleSide::Queenside => 3,
        }
    }

    /// Side whose rook starts on the given corner file.
    pub const fn from_rook_file(file: u8) -> Option<Self> {
        match file {
            7 => Some(CastleSide::Kingside),
            0 => Some(CastleSide::Queenside),
            _ => None,
        }
    }
}

/// File every king starts on.
pub const KING_START_FILE: u8 = 4;

/// Castling rights flags plus per-color "king has moved" markers.
///
/// Flags only ever clear; nothing in the engine sets a right back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0000_0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0000_0010;
    pub const BLACK_KINGSIDE: u8 = 0b0000_0100;
    pub const BLACK_QUEENSIDE: u8 = 0b0000_1000;
    pub const WHITE_KING_MOVED: u8 = 0b0001_0000;
    pub const BLACK_KING_MOVED: u8 = 0b0010_0000;
    pub const ALL: CastlingRights = CastlingRights(0b0000_1111);

    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b0011_1111)
    }

    const fn side_flag(color: Color, side: CastleSide) -> u8 {
        match (color, side) {
            (Color::White, CastleSide::Kingside) => Self::WHITE_KINGSIDE,
            (Color::White, CastleSide::Queenside) => Self::WHITE_QUEENSIDE,
            (Color::Black, CastleSide::Kingside) => Self::BLACK_KINGSIDE,
            (Color::Black, CastleSide::Queenside) => Self::BLACK_QUEENSIDE,
        }
    }

    const fn king_flag(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_KING_MOVED,
            Color::Black => Self::BLACK_KING_MOVED,
        }
    }

    /// True while the rook on this side has not moved.
    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::side_flag(color, side) != 0
    }

    #[inline]
    pub const fn king_moved(self, color: Color) -> bool {
        self.0 & Self::king_flag(color) != 0
    }

    /// Both castling preconditions that are tracked as history.
    #[inline]
    pub const fn can_castle(self, color: Color, side: CastleSide) -> bool {
        self.has(color, side) && !self.king_moved(color)
    }

    /// Permanently removes one side's right.
    #[inline]
    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        self.0 &= !Self::side_flag(color, side);
    }

    /// Records a king move, which removes both of its rights.
    #[inline]
    pub fn mark_king_moved(&mut self, color: Color) {
        self.revoke(color, CastleSide::Kingside);
        self.revoke(color, CastleSide::Queenside);
        self.0 |= Self::king_flag(color);
    }

    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }

    fn from_fen_letters(letters: &str) -> Self {
        let mut flags = 0;
        for c in letters.chars() {
            flags |= match c {
                'K' => Self::WHITE_KINGSIDE,
                'Q' => Self::WHITE_QUEENSIDE,
                'k' => Self::BLACK_KINGSIDE,
                'q' => Self::BLACK_QUEENSIDE,
                _ => 0,
            };
        }
        CastlingRights::new(flags)
    }

    fn to_fen_letters(self) -> String {
        [
            (Color::White, CastleSide::Kingside, 'K'),
            (Color::White, CastleSide::Queenside, 'Q'),
            (Color::Black, CastleSide::Kingside, 'k'),
            (Color::Black, CastleSide::Queenside, 'q'),
        ]
        .into_iter()
        .filter(|&(color, side, _)| self.can_castle(color, side))
        .map(|(_, _, c)| c)
        .collect()
    }
}

/// Square a pawn skipped with a double advance, and that pawn's color.
///
/// Present only in the position immediately after the advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnPassantTarget {
    pub square: Square,
    pub pawn_color: Color,
}

impl EnPassantTarget {
    /// Square the double-advanced pawn stands on.
    pub fn pawn_square(self) -> Option<Square> {
        self.square.offset(0, self.pawn_color.pawn_direction())
    }
}

/// Board layout plus side to move, compared for repetition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 65]);

impl Fingerprint {
    fn piece_code(piece: Option<Piece>) -> u8 {
        match piece {
            Some(p) => 1 + (p.color.index() * PieceKind::ALL.len() + p.kind.index()) as u8,
            None => 0,
        }
    }
}

/// Complete game position.
///
/// Fields are private: only the engine's move executor changes a position,
/// and it always does so on a fresh copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: [Option<Piece>; 64],
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<EnPassantTarget>,
    halfmove_clock: u32,
    fullmove_count: u32,
    status: GameStatus,
}

impl Position {
    /// Creates an empty board, White to move.
    pub fn empty() -> Self {
        Position {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_count: 1,
            status: GameStatus::Active,
        }
    }

    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_fen(Fen::STARTPOS).expect("STARTPOS is valid")
    }

    /// Creates a position from a FEN string.
    ///
    /// The en-passant field is kept only when a pawn of the opposite color
    /// really stands in front of the target square.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = Fen::parse(fen)?;

        let en_passant = parsed.en_passant.and_then(|square| {
            let target = EnPassantTarget {
                square,
                pawn_color: parsed.side_to_move.opposite(),
            };
            let pawn = target.pawn_square().and_then(|sq| parsed.board[sq.index()]);
            (pawn == Some(Piece::new(target.pawn_color, PieceKind::Pawn))).then_some(target)
        });

        Ok(Position {
            board: parsed.board,
            side_to_move: parsed.side_to_move,
            castling: CastlingRights::from_fen_letters(&parsed.castling),
            en_passant,
            halfmove_clock: parsed.halfmove_clock,
            fullmove_count: parsed.move_count,
            status: GameStatus::Active,
        })
    }

    /// Converts the position to a FEN string. Status is not part of FEN.
    pub fn to_fen(&self) -> String {
        Fen {
            board: self.board,
            side_to_move: self.side_to_move,
            castling: self.castling.to_fen_letters(),
            en_passant: self.en_passant.map(|t| t.square),
            halfmove_clock: self.halfmove_clock,
            move_count: self.fullmove_count,
        }
        .to_string()
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<EnPassantTarget> {
        self.en_passant
    }

    /// Halfmoves since the last capture or pawn move.
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Counter bumped by every executed move.
    #[inline]
    pub fn fullmove_count(&self) -> u32 {
        self.fullmove_count
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// All occupied squares with their pieces, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Square of the given color's king, if it is still on the board.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(color, PieceKind::King);
        self.pieces()
            .find_map(|(sq, piece)| (piece == king).then_some(sq))
    }

    /// Board layout and side to move, for repetition detection.
    pub fn fingerprint(&self) -> Fingerprint {
        let mut bytes = [0u8; 65];
        for (code, piece) in bytes.iter_mut().zip(self.board.iter()) {
            *code = Fingerprint::piece_code(*piece);
        }
        bytes[64] = self.side_to_move.index() as u8;
        Fingerprint(bytes)
    }

    pub(crate) fn put(&mut self, sq: Square, piece: Piece) {
        self.board[sq.index()] = Some(piece);
    }

    pub(crate) fn take(&mut self, sq: Square) -> Option<Piece> {
        self.board[sq.index()].take()
    }

    pub(crate) fn castling_mut(&mut self) -> &mut CastlingRights {
        &mut self.castling
    }

    pub(crate) fn set_en_passant(&mut self, target: Option<EnPassantTarget>) {
        self.en_passant = target;
    }

    pub(crate) fn set_halfmove_clock(&mut self, clock: u32) {
        self.halfmove_clock = clock;
    }

    pub(crate) fn bump_fullmove_count(&mut self) {
        self.fullmove_count = self.fullmove_count.saturating_add(1);
    }

    pub(crate) fn flip_side_to_move(&mut self) {
        self.side_to_move = self.side_to_move.opposite();
    }

    pub(crate) fn set_status(&mut self, status: GameStatus) {
        self.status = status;
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_fen_roundtrip() {
        let pos = Position::startpos();
        assert_eq!(pos.to_fen(), Fen::STARTPOS);
        assert_eq!(pos.status(), GameStatus::Active);
    }

    #[test]
    fn piece_at_and_kings() {
        let pos = Position::startpos();
        assert_eq!(
            pos.piece_at(Square::E1),
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(pos.king_square(Color::Black), Some(Square::E8));
        assert_eq!(pos.pieces().count(), 32);
        assert_eq!(Position::empty().king_square(Color::White), None);
    }

    #[test]
    fn castling_rights_only_clear() {
        let mut rights = CastlingRights::ALL;
        assert!(rights.can_castle(Color::White, CastleSide::Kingside));

        rights.revoke(Color::White, CastleSide::Kingside);
        assert!(!rights.can_castle(Color::White, CastleSide::Kingside));
        assert!(rights.can_castle(Color::White, CastleSide::Queenside));

        rights.mark_king_moved(Color::Black);
        assert!(rights.king_moved(Color::Black));
        assert!(!rights.can_castle(Color::Black, CastleSide::Kingside));
        assert!(!rights.can_castle(Color::Black, CastleSide::Queenside));
        assert!(!rights.king_moved(Color::White));
    }

    #[test]
    fn en_passant_requires_the_pawn() {
        let with_pawn =
            Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
                .unwrap();
        assert_eq!(
            with_pawn.en_passant(),
            Some(EnPassantTarget {
                square: Square::from_algebraic("e3").unwrap(),
                pawn_color: Color::White,
            })
        );

        let without_pawn =
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq e3 0 1")
                .unwrap();
        assert_eq!(without_pawn.en_passant(), None);
    }

    #[test]
    fn fingerprint_ignores_clocks_but_not_side() {
        let a = Position::from_fen("8/8/8/8/8/8/8/K6k w - - 0 1").unwrap();
        let b = Position::from_fen("8/8/8/8/8/8/8/K6k w - - 12 40").unwrap();
        let c = Position::from_fen("8/8/8/8/8/8/8/K6k b - - 0 1").unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn castle_side_geometry() {
        assert_eq!(CastleSide::from_rook_file(7), Some(CastleSide::Kingside));
        assert_eq!(CastleSide::from_rook_file(0), Some(CastleSide::Queenside));
        assert_eq!(CastleSide::from_rook_file(3), None);
        assert_eq!(CastleSide::Queenside.king_target_file(), 2);
        assert_eq!(CastleSide::Kingside.rook_target_file(), 5);
    }
}

//! Chess position representation.
//!
//! A position is 64 cells, each empty or holding one colored piece, plus the
//! side channels that the placement alone cannot express: the side to move,
//! the castling markers and the en passant square.

use chess_core::{Color, File, Piece, Rank, Square};
use std::fmt;
use thiserror::Error;

/// Contents of one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Piece, Color),
}

impl Cell {
    /// Returns the piece and color on this cell, if any.
    #[inline]
    pub const fn piece(self) -> Option<(Piece, Color)> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(piece, color) => Some((piece, color)),
        }
    }

    /// Returns true if no piece stands here.
    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Castling markers, one per rook home square.
///
/// A marker is set while neither the rook on that square nor its king has
/// moved and the rook has not been captured. Once cleared it never returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// The rook home squares, in marker bit order.
    const ROOK_SQUARES: [Square; 4] = [Square::H1, Square::A1, Square::H8, Square::A8];

    /// Marker bit for a rook home square, or 0 for any other square.
    const fn bit(square: Square) -> u8 {
        match square.index() {
            7 => Self::WHITE_KINGSIDE,
            0 => Self::WHITE_QUEENSIDE,
            63 => Self::BLACK_KINGSIDE,
            56 => Self::BLACK_QUEENSIDE,
            _ => 0,
        }
    }

    /// Home square of the king-side rook for a color.
    #[inline]
    pub const fn kingside_rook(color: Color) -> Square {
        match color {
            Color::White => Square::H1,
            Color::Black => Square::H8,
        }
    }

    /// Home square of the queen-side rook for a color.
    #[inline]
    pub const fn queenside_rook(color: Color) -> Square {
        match color {
            Color::White => Square::A1,
            Color::Black => Square::A8,
        }
    }

    /// Returns these rights with the marker on `rook_square` set.
    ///
    /// Squares other than the four rook home squares are ignored.
    #[inline]
    pub const fn with(self, rook_square: Square) -> Self {
        CastlingRights(self.0 | Self::bit(rook_square))
    }

    /// Returns true if the marker on the given rook home square is set.
    #[inline]
    pub const fn has(self, rook_square: Square) -> bool {
        let bit = Self::bit(rook_square);
        bit != 0 && (self.0 & bit) != 0
    }

    /// Returns true if the given side can still castle king-side.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        self.has(Self::kingside_rook(color))
    }

    /// Returns true if the given side can still castle queen-side.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        self.has(Self::queenside_rook(color))
    }

    /// Clears the marker on a rook home square. Other squares are a no-op.
    #[inline]
    pub fn remove(&mut self, square: Square) {
        self.0 &= !Self::bit(square);
    }

    /// Clears both markers of a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove(Self::kingside_rook(color));
        self.remove(Self::queenside_rook(color));
    }

    /// Iterates over the rook home squares whose marker is set.
    pub fn rook_squares(self) -> impl Iterator<Item = Square> {
        Self::ROOK_SQUARES
            .into_iter()
            .filter(move |&sq| self.has(sq))
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// Reasons a [`PositionBuilder`] refuses to build.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PositionError {
    #[error("square {0} is occupied twice")]
    OccupiedSquare(Square),

    #[error("pawn placed on back rank square {0}")]
    PawnOnBackRank(Square),

    #[error("{0} has no king")]
    MissingKing(Color),

    #[error("{0} has more than one king")]
    DuplicateKing(Color),

    #[error("castling marker on {0} without an unmoved rook and king")]
    CastlingWithoutPieces(Square),

    #[error("en passant square {0} does not follow a double step")]
    InvalidEnPassant(Square),
}

/// Complete chess position state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    pub(crate) cells: [Cell; 64],
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
}

impl Position {
    /// Creates the standard starting position: all castling markers set, no
    /// en passant square, White to move.
    pub fn startpos() -> Self {
        const BACK_ROW: [Piece; 8] = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];

        let mut cells = [Cell::Empty; 64];
        for color in Color::BOTH {
            for file in File::ALL {
                let back = Square::new(file, color.back_rank());
                let pawn = Square::new(file, color.pawn_rank());
                cells[back.index() as usize] = Cell::Occupied(BACK_ROW[file.index() as usize], color);
                cells[pawn.index() as usize] = Cell::Occupied(Piece::Pawn, color);
            }
        }

        Position {
            cells,
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
        }
    }

    /// Starts building a custom position.
    pub fn builder() -> PositionBuilder {
        PositionBuilder::new()
    }

    /// Returns the contents of a square.
    #[inline]
    pub fn cell(&self, sq: Square) -> Cell {
        self.cells[sq.index() as usize]
    }

    /// Returns the piece and color at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.cell(sq).piece()
    }

    /// The side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Castling markers still set.
    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// Square skipped by the previous ply's double step, if it can be captured into.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Iterates over every piece of one color with its square.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.cell(sq) {
            Cell::Occupied(piece, c) if c == color => Some((sq, piece)),
            _ => None,
        })
    }

    /// Iterates over the squares holding the given piece kind of one color.
    pub fn squares_of(&self, piece: Piece, color: Color) -> impl Iterator<Item = Square> + '_ {
        Square::all().filter(move |&sq| self.cell(sq) == Cell::Occupied(piece, color))
    }

    /// Returns the square of the king of the given color.
    ///
    /// # Panics
    ///
    /// Panics if that king is missing. Positions built by [`PositionBuilder`]
    /// or reached through move application always hold both kings.
    pub fn king_square(&self, color: Color) -> Square {
        match self.squares_of(Piece::King, color).next() {
            Some(sq) => sq,
            None => panic!("position invariant violated: {color} has no king"),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl fmt::Display for Position {
    /// Draws the board with rank 8 on top, `.` for empty squares.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.iter().rev() {
            write!(f, "{} ", rank)?;
            for file in File::ALL {
                let c = match self.piece_at(Square::new(file, *rank)) {
                    Some((piece, color)) => piece.to_char(color),
                    None => '.',
                };
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for file in File::ALL {
            write!(f, " {}", file)?;
        }
        writeln!(f)?;
        write!(f, "{} to move", self.side_to_move)
    }
}

/// Assembles and validates a custom [`Position`].
#[derive(Debug, Clone)]
pub struct PositionBuilder {
    placements: Vec<(Square, Piece, Color)>,
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
}

impl Default for PositionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionBuilder {
    /// An empty board, White to move, no castling markers.
    pub fn new() -> Self {
        PositionBuilder {
            placements: Vec::new(),
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
        }
    }

    /// Places a piece.
    pub fn piece(mut self, square: Square, piece: Piece, color: Color) -> Self {
        self.placements.push((square, piece, color));
        self
    }

    /// Sets the side to move.
    pub fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    /// Sets the castling markers.
    pub fn castling(mut self, rights: CastlingRights) -> Self {
        self.castling = rights;
        self
    }

    /// Sets the en passant square (the square skipped by the last double step).
    pub fn en_passant(mut self, square: Square) -> Self {
        self.en_passant = Some(square);
        self
    }

    /// Validates the placement and produces the position.
    pub fn build(self) -> Result<Position, PositionError> {
        let mut cells = [Cell::Empty; 64];
        for &(square, piece, color) in &self.placements {
            let cell = &mut cells[square.index() as usize];
            if !cell.is_empty() {
                return Err(PositionError::OccupiedSquare(square));
            }
            if piece == Piece::Pawn && matches!(square.rank(), Rank::R1 | Rank::R8) {
                return Err(PositionError::PawnOnBackRank(square));
            }
            *cell = Cell::Occupied(piece, color);
        }

        let position = Position {
            cells,
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
        };

        for color in Color::BOTH {
            match position.squares_of(Piece::King, color).count() {
                0 => return Err(PositionError::MissingKing(color)),
                1 => {}
                _ => return Err(PositionError::DuplicateKing(color)),
            }
        }

        for rook_square in self.castling.rook_squares() {
            let color = if rook_square.rank() == Rank::R1 {
                Color::White
            } else {
                Color::Black
            };
            let king_home = Square::new(File::E, color.back_rank());
            if position.cell(rook_square) != Cell::Occupied(Piece::Rook, color)
                || position.cell(king_home) != Cell::Occupied(Piece::King, color)
            {
                return Err(PositionError::CastlingWithoutPieces(rook_square));
            }
        }

        if let Some(ep) = self.en_passant {
            // The side that just moved is the one not on move.
            let mover = self.side_to_move.opposite();
            let landed = ep.offset(0, mover.pawn_direction());
            let expected_rank = match mover {
                Color::White => Rank::R3,
                Color::Black => Rank::R6,
            };
            let valid = ep.rank() == expected_rank
                && position.cell(ep).is_empty()
                && landed.map(|sq| position.cell(sq)) == Some(Cell::Occupied(Piece::Pawn, mover));
            if !valid {
                return Err(PositionError::InvalidEnPassant(ep));
            }
        }

        Ok(position)
    }
}

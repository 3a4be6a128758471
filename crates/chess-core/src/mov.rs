//! Move representation.

use crate::{Piece, Square};
use std::fmt;

/// Special actions attached to a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveFlag {
    /// Plain move or capture.
    Normal = 0,
    /// Pawn double step from its starting rank.
    DoublePush = 1,
    /// King-side castling (O-O).
    CastleKingside = 2,
    /// Queen-side castling (O-O-O).
    CastleQueenside = 3,
    /// En passant capture.
    EnPassant = 4,
    /// Pawn reaching the farthest rank. The replacement piece is chosen when
    /// the move is applied.
    Promotion = 5,
}

impl MoveFlag {
    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveFlag::CastleKingside | MoveFlag::CastleQueenside)
    }
}

/// A move of one piece from one square to another.
///
/// Protective moves target a square held by a friendly piece. They are never
/// playable; scanners emit them so that defended squares are known.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    piece: Piece,
    from: Square,
    to: Square,
    flag: MoveFlag,
    protective: bool,
}

impl Move {
    /// Creates a playable move.
    #[inline]
    pub const fn new(piece: Piece, from: Square, to: Square, flag: MoveFlag) -> Self {
        Move {
            piece,
            from,
            to,
            flag,
            protective: false,
        }
    }

    /// Creates a normal move (no special flags).
    #[inline]
    pub const fn normal(piece: Piece, from: Square, to: Square) -> Self {
        Self::new(piece, from, to, MoveFlag::Normal)
    }

    /// Creates a protective pseudo-move onto a friendly-occupied square.
    #[inline]
    pub const fn protective(piece: Piece, from: Square, to: Square) -> Self {
        Move {
            piece,
            from,
            to,
            flag: MoveFlag::Normal,
            protective: true,
        }
    }

    /// The kind of piece being moved.
    #[inline]
    pub const fn piece(self) -> Piece {
        self.piece
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Returns the move flag.
    #[inline]
    pub const fn flag(self) -> MoveFlag {
        self.flag
    }

    /// Returns true for pseudo-moves onto a friendly piece.
    #[inline]
    pub const fn is_protective(self) -> bool {
        self.protective
    }

    /// Coordinate notation for this move (e.g., "e2e4").
    pub fn to_coordinate(self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Parses the two squares of a coordinate move such as "e2e4" or "e2-e4".
    ///
    /// Only the squares are recovered; the piece and flag depend on the
    /// position the move is played in.
    pub fn parse_squares(s: &str) -> Option<(Square, Square)> {
        let s = s.trim();
        let (from, to) = match s.len() {
            4 => (s.get(0..2)?, s.get(2..4)?),
            5 if s.as_bytes()[2] == b'-' => (s.get(0..2)?, s.get(3..5)?),
            _ => return None,
        };
        Some((Square::from_algebraic(from)?, Square::from_algebraic(to)?))
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({} {}", self.piece, self.to_coordinate())?;
        if self.flag != MoveFlag::Normal {
            write!(f, " {:?}", self.flag)?;
        }
        if self.protective {
            write!(f, " protective")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coordinate())
    }
}

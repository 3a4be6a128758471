//! Per-side occupancy maps handed to the piece scanners.

use crate::position::{CastlingRights, Position};
use chess_core::{Color, Piece, Square};

/// What one side has on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Occupant {
    #[default]
    Empty,
    Piece,
    King,
}

/// Occupancy of one side over the whole board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyMap([Occupant; 64]);

impl OccupancyMap {
    /// Marks every square holding a piece of `color`, kings distinguished.
    pub fn of(position: &Position, color: Color) -> Self {
        let mut map = [Occupant::Empty; 64];
        for (sq, piece) in position.pieces(color) {
            map[sq.index() as usize] = if piece == Piece::King {
                Occupant::King
            } else {
                Occupant::Piece
            };
        }
        OccupancyMap(map)
    }

    #[inline]
    pub fn get(&self, sq: Square) -> Occupant {
        self.0[sq.index() as usize]
    }

    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.get(sq) != Occupant::Empty
    }
}

/// Everything a scanner may look at for one side.
///
/// En passant and castling only matter for the side to move; when scanning
/// the opponent they are left empty so that side only contributes attacks.
#[derive(Debug, Clone)]
pub struct ScanContext {
    pub color: Color,
    pub own: OccupancyMap,
    pub rival: OccupancyMap,
    pub en_passant: Option<Square>,
    pub castling: CastlingRights,
}

impl ScanContext {
    /// Context for the side to move.
    pub fn active(position: &Position) -> Self {
        let color = position.side_to_move();
        ScanContext {
            color,
            own: OccupancyMap::of(position, color),
            rival: OccupancyMap::of(position, color.opposite()),
            en_passant: position.en_passant(),
            castling: position.castling(),
        }
    }

    /// Context for `color` when it is only being examined for the squares it attacks.
    pub fn passive(position: &Position, color: Color) -> Self {
        ScanContext {
            color,
            own: OccupancyMap::of(position, color),
            rival: OccupancyMap::of(position, color.opposite()),
            en_passant: None,
            castling: CastlingRights::NONE,
        }
    }

    /// True if either side stands on the square.
    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.own.is_occupied(sq) || self.rival.is_occupied(sq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sq;

    #[test]
    fn startpos_occupancy() {
        let pos = Position::startpos();
        let white = OccupancyMap::of(&pos, Color::White);
        assert_eq!(white.get(Square::E1), Occupant::King);
        assert_eq!(white.get(Square::D1), Occupant::Piece);
        assert_eq!(white.get(sq("e4")), Occupant::Empty);
        assert_eq!(white.get(Square::E8), Occupant::Empty);
    }

    #[test]
    fn passive_context_ignores_side_channels() {
        let pos = Position::startpos();
        let ctx = ScanContext::passive(&pos, Color::Black);
        assert_eq!(ctx.castling, CastlingRights::NONE);
        assert_eq!(ctx.own.get(Square::E8), Occupant::King);
        assert!(ctx.is_occupied(Square::E1));

        let active = ScanContext::active(&pos);
        assert_eq!(active.color, Color::White);
        assert_eq!(active.castling, CastlingRights::ALL);
    }
}

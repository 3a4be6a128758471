//! Danger zone: the opponent's attacked squares, annotated for king safety,
//! pins and forced blocks.

use super::occupancy::ScanContext;
use super::scanners::scan_side;
use crate::Position;
use chess_core::Square;

/// What the opponent's pieces imply about one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DangerSquare {
    pub square: Square,
    /// The square lies on a ray that reaches the king.
    pub threats_king: bool,
    /// The square holds the only piece between a ray's origin and the king.
    pub blocks_attack: bool,
    /// The king may stand here without being capturable.
    pub king_can_go: bool,
    /// A piece stands on the square.
    pub is_piece_here: bool,
    /// Square of the piece whose scan produced this entry.
    pub attack_origin: Option<Square>,
}

impl DangerSquare {
    /// An entry forbidding the king from `square`, produced by the piece on `origin`.
    #[inline]
    pub const fn attacked(square: Square, origin: Square) -> Self {
        DangerSquare {
            square,
            threats_king: false,
            blocks_attack: false,
            king_can_go: false,
            is_piece_here: false,
            attack_origin: Some(origin),
        }
    }

    /// Combines two entries for the same square.
    ///
    /// Safe only if every contribution says so; threatening or blocking if
    /// any does. The origin kept is the blocking one when there is one, then
    /// the lowest square, which keeps the fold independent of scan order.
    pub fn merge(self, other: DangerSquare) -> DangerSquare {
        debug_assert_eq!(self.square, other.square);

        let attack_origin = match (self.blocks_attack, other.blocks_attack) {
            (true, false) => self.attack_origin,
            (false, true) => other.attack_origin,
            _ => match (self.attack_origin, other.attack_origin) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, None) => a,
                (None, b) => b,
            },
        };

        DangerSquare {
            square: self.square,
            threats_king: self.threats_king || other.threats_king,
            blocks_attack: self.blocks_attack || other.blocks_attack,
            king_can_go: self.king_can_go && other.king_can_go,
            is_piece_here: self.is_piece_here || other.is_piece_here,
            attack_origin,
        }
    }
}

/// Canonical per-square map of merged [`DangerSquare`] entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DangerZone {
    squares: [Option<DangerSquare>; 64],
}

impl DangerZone {
    /// Folds raw scanner contributions into one entry per square.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = DangerSquare>,
    {
        let mut squares = [None; 64];
        for entry in entries {
            let slot: &mut Option<DangerSquare> = &mut squares[entry.square.index() as usize];
            *slot = Some(match *slot {
                Some(existing) => existing.merge(entry),
                None => entry,
            });
        }
        DangerZone { squares }
    }

    /// The danger zone the side to move faces.
    pub fn of(position: &Position) -> Self {
        let them = position.side_to_move().opposite();
        let scan = scan_side(position, &ScanContext::passive(position, them));
        Self::from_entries(scan.danger)
    }

    /// Returns the entry for a square, if any opponent piece reaches it.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<&DangerSquare> {
        self.squares[sq.index() as usize].as_ref()
    }

    /// True if the king could stand on the square.
    #[inline]
    pub fn is_safe_for_king(&self, sq: Square) -> bool {
        self.get(sq).map_or(true, |entry| entry.king_can_go)
    }

    /// Iterates over the annotated squares from a1 to h8.
    pub fn iter(&self) -> impl Iterator<Item = &DangerSquare> {
        self.squares.iter().flatten()
    }

    /// Number of annotated squares.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// True if no square is annotated.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

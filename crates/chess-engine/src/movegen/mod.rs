//! Move generation.
//!
//! Generation runs in one direction per turn: the piece scanners produce
//! pseudo-legal moves and attacked-square annotations for both sides, the
//! opponent's annotations are folded into a [`DangerZone`], and the legality
//! filter combines the two into the playable move set and the check state.

mod danger;
mod legal;
mod occupancy;
pub mod perft;
mod scanners;

use chess_core::{Move, Square};

pub use danger::{DangerSquare, DangerZone};
pub use legal::{generate_legal_moves, is_king_attacked, LegalMoves};
pub use occupancy::{Occupant, OccupancyMap, ScanContext};
pub use scanners::{
    scan_bishops, scan_king, scan_knights, scan_pawns, scan_queens, scan_rooks, scan_side, Scan,
};

/// An ordered list of moves.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MoveList(Vec<Move>);

impl MoveList {
    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList(Vec::new())
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        self.0.push(m);
    }

    /// Returns the number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.0
    }

    /// Iterates over the moves in order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.0.iter()
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        self.0.retain(f);
    }

    /// Finds the move between two squares, if the list holds one.
    pub fn find(&self, from: Square, to: Square) -> Option<Move> {
        self.0.iter().copied().find(|m| m.from() == from && m.to() == to)
    }

    /// Moves starting on the given square, e.g. to highlight a selected piece's targets.
    pub fn from_square(&self, from: Square) -> impl Iterator<Item = Move> + '_ {
        self.0.iter().copied().filter(move |m| m.from() == from)
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<Move> for MoveList {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        MoveList(iter.into_iter().collect())
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Squares strictly between `a` and `b` when they share a rank, file or
/// diagonal; empty otherwise.
pub(crate) fn squares_between(a: Square, b: Square) -> Vec<Square> {
    let df = b.file().index() as i8 - a.file().index() as i8;
    let dr = b.rank().index() as i8 - a.rank().index() as i8;
    if a == b || !(df == 0 || dr == 0 || df.abs() == dr.abs()) {
        return Vec::new();
    }

    let (step_file, step_rank) = (df.signum(), dr.signum());
    let mut squares = Vec::new();
    let mut current = a.offset(step_file, step_rank);
    while let Some(sq) = current {
        if sq == b {
            break;
        }
        squares.push(sq);
        current = sq.offset(step_file, step_rank);
    }
    squares
}

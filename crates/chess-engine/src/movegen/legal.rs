//! Legality filter.

use super::danger::DangerZone;
use super::occupancy::ScanContext;
use super::scanners::scan_side;
use super::{squares_between, MoveList};
use crate::apply::make_move;
use crate::Position;
use chess_core::{Color, Move, MoveFlag, Piece, Square};
use tracing::trace;

/// The legal moves of the side to move and whether its king is in check.
///
/// Checkmate and stalemate are read off the pair: no moves while in check is
/// mate, no moves otherwise is stalemate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalMoves {
    pub in_check: bool,
    pub moves: MoveList,
}

impl LegalMoves {
    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.in_check && self.moves.is_empty()
    }

    #[inline]
    pub fn is_stalemate(&self) -> bool {
        !self.in_check && self.moves.is_empty()
    }
}

/// Generates every legal move for the side to move.
///
/// Protective moves are never returned. Promotions appear once per pawn
/// destination; the piece is chosen when the move is applied.
pub fn generate_legal_moves(position: &Position) -> LegalMoves {
    let us = position.side_to_move();
    let king = position.king_square(us);

    let own = scan_side(position, &ScanContext::active(position));
    let theirs = scan_side(position, &ScanContext::passive(position, us.opposite()));
    let checkers = find_checkers(&theirs.moves, king);
    let zone = DangerZone::from_entries(theirs.danger);

    let moves: MoveList = own
        .moves
        .into_iter()
        .filter(|m| !m.is_protective())
        .filter(|&m| is_legal(position, &zone, king, &checkers, m))
        .collect();

    trace!(
        side = %us,
        checkers = checkers.len(),
        moves = moves.len(),
        "generated legal moves"
    );

    LegalMoves {
        in_check: !checkers.is_empty(),
        moves,
    }
}

/// Returns true if the king of `color` is attacked in this position,
/// regardless of whose turn it is.
pub fn is_king_attacked(position: &Position, color: Color) -> bool {
    let king = position.king_square(color);
    let theirs = scan_side(position, &ScanContext::passive(position, color.opposite()));
    !DangerZone::from_entries(theirs.danger).is_safe_for_king(king)
}

/// Origins of opponent moves that land on the king.
fn find_checkers(moves: &[Move], king: Square) -> Vec<Square> {
    let mut checkers: Vec<Square> = moves
        .iter()
        .filter(|m| !m.is_protective() && m.to() == king)
        .map(|m| m.from())
        .collect();
    checkers.sort();
    checkers.dedup();
    checkers
}

fn is_legal(position: &Position, zone: &DangerZone, king: Square, checkers: &[Square], m: Move) -> bool {
    if m.piece() == Piece::King {
        return if m.flag().is_castling() {
            checkers.is_empty() && castling_path_is_safe(zone, m)
        } else {
            zone.is_safe_for_king(m.to())
        };
    }

    // Only the king may answer a double check.
    if checkers.len() > 1 {
        return false;
    }

    if let Some(entry) = zone.get(m.from()) {
        if entry.blocks_attack {
            if let Some(origin) = entry.attack_origin {
                if m.to() != origin && !squares_between(origin, king).contains(&m.to()) {
                    return false;
                }
            }
        }
    }

    if let [checker] = checkers {
        let captures_checker = m.to() == *checker
            || (m.flag() == MoveFlag::EnPassant && en_passant_victim(m) == *checker);
        if !captures_checker && !squares_between(*checker, king).contains(&m.to()) {
            return false;
        }
    }

    // Removing two pawns from one rank can uncover a rook or queen that no
    // single-piece pin describes.
    if m.flag() == MoveFlag::EnPassant {
        let after = make_move(position, m, Piece::Queen);
        if is_king_attacked(&after, position.side_to_move()) {
            return false;
        }
    }

    true
}

/// The king may not start on, cross, or land on an attacked square.
fn castling_path_is_safe(zone: &DangerZone, m: Move) -> bool {
    zone.is_safe_for_king(m.from())
        && squares_between(m.from(), m.to())
            .into_iter()
            .all(|sq| zone.is_safe_for_king(sq))
        && zone.is_safe_for_king(m.to())
}

#[inline]
fn en_passant_victim(m: Move) -> Square {
    Square::new(m.to().file(), m.from().rank())
}

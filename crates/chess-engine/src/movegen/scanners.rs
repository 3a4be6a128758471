//! Per-piece scanners.
//!
//! Each scanner takes the squares of one piece kind and returns the
//! pseudo-legal moves of those pieces together with the danger entries they
//! cast. Entries are what the *other* king has to respect; moves are only
//! meaningful for the side to move, except that the opponent's moves onto
//! the king square identify the checkers.

use super::danger::DangerSquare;
use super::occupancy::{Occupant, ScanContext};
use crate::position::{CastlingRights, Position};
use chess_core::{File, Move, MoveFlag, Piece, Square};

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_STEPS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Output of a scan: pseudo-legal moves and raw danger entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scan {
    pub moves: Vec<Move>,
    pub danger: Vec<DangerSquare>,
}

impl Scan {
    fn absorb(&mut self, other: Scan) {
        self.moves.extend(other.moves);
        self.danger.extend(other.danger);
    }
}

/// Runs every scanner for the side described by `ctx`.
pub fn scan_side(position: &Position, ctx: &ScanContext) -> Scan {
    let mut scan = Scan::default();
    for piece in Piece::ALL {
        let squares: Vec<Square> = position.squares_of(piece, ctx.color).collect();
        if squares.is_empty() {
            continue;
        }
        let part = match piece {
            Piece::Pawn => scan_pawns(&squares, ctx),
            Piece::Knight => scan_knights(&squares, ctx),
            Piece::Bishop => scan_bishops(&squares, ctx),
            Piece::Rook => scan_rooks(&squares, ctx),
            Piece::Queen => scan_queens(&squares, ctx),
            Piece::King => scan_king(&squares, ctx),
        };
        scan.absorb(part);
    }
    scan
}

/// Pawn pushes, captures and en passant; both diagonal squares are always
/// reported as attacked.
pub fn scan_pawns(pawns: &[Square], ctx: &ScanContext) -> Scan {
    let mut scan = Scan::default();
    let dir = ctx.color.pawn_direction();
    let promotion_rank = ctx.color.promotion_rank();

    for &from in pawns {
        let Some(one) = from.offset(0, dir) else {
            continue;
        };
        let arrival = if one.rank() == promotion_rank {
            MoveFlag::Promotion
        } else {
            MoveFlag::Normal
        };

        if !ctx.is_occupied(one) {
            scan.moves.push(Move::new(Piece::Pawn, from, one, arrival));
            if from.rank() == ctx.color.pawn_rank() {
                if let Some(two) = from.offset(0, 2 * dir) {
                    if !ctx.is_occupied(two) {
                        scan.moves.push(Move::new(Piece::Pawn, from, two, MoveFlag::DoublePush));
                    }
                }
            }
        }

        for side in [-1, 1] {
            let Some(target) = from.offset(side, dir) else {
                continue;
            };
            scan.danger.push(DangerSquare::attacked(target, from));
            if ctx.rival.is_occupied(target) {
                scan.moves.push(Move::new(Piece::Pawn, from, target, arrival));
            } else if ctx.en_passant == Some(target) {
                scan.moves.push(Move::new(Piece::Pawn, from, target, MoveFlag::EnPassant));
            }
        }
    }
    scan
}

pub fn scan_knights(knights: &[Square], ctx: &ScanContext) -> Scan {
    scan_steps(Piece::Knight, &KNIGHT_STEPS, knights, ctx)
}

pub fn scan_bishops(bishops: &[Square], ctx: &ScanContext) -> Scan {
    scan_sliders(Piece::Bishop, &DIAGONALS, bishops, ctx)
}

pub fn scan_rooks(rooks: &[Square], ctx: &ScanContext) -> Scan {
    scan_sliders(Piece::Rook, &ORTHOGONALS, rooks, ctx)
}

pub fn scan_queens(queens: &[Square], ctx: &ScanContext) -> Scan {
    let mut directions = [(0, 0); 8];
    directions[..4].copy_from_slice(&DIAGONALS);
    directions[4..].copy_from_slice(&ORTHOGONALS);
    scan_sliders(Piece::Queen, &directions, queens, ctx)
}

/// King steps plus castling candidates.
///
/// Castling candidates only check the markers and that the squares between
/// king and rook are empty; attacked squares are left to the legality filter.
pub fn scan_king(kings: &[Square], ctx: &ScanContext) -> Scan {
    let mut scan = scan_steps(Piece::King, &KING_STEPS, kings, ctx);
    for &from in kings {
        push_castling(from, ctx, &mut scan);
    }
    scan
}

/// Single-step pieces: every reachable square is attacked, own-occupied
/// targets become protective moves.
fn scan_steps(piece: Piece, steps: &[(i8, i8)], squares: &[Square], ctx: &ScanContext) -> Scan {
    let mut scan = Scan::default();
    for &from in squares {
        for &(df, dr) in steps {
            let Some(to) = from.offset(df, dr) else {
                continue;
            };
            scan.danger.push(DangerSquare::attacked(to, from));
            scan.moves.push(if ctx.own.is_occupied(to) {
                Move::protective(piece, from, to)
            } else {
                Move::normal(piece, from, to)
            });
        }
    }
    scan
}

fn scan_sliders(piece: Piece, directions: &[(i8, i8)], squares: &[Square], ctx: &ScanContext) -> Scan {
    let mut scan = Scan::default();
    for &from in squares {
        for &(df, dr) in directions {
            cast_ray(piece, from, df, dr, ctx, &mut scan);
        }
    }
    scan
}

/// Walks one ray to the board edge.
///
/// Moves stop at the first piece. Danger entries continue past it: squares
/// up to and including the first non-king piece are forbidden to the king,
/// squares behind it are not. A king on the ray does not shield the squares
/// behind it. If the rival king is hit, every entry of the ray (origin
/// included) threatens it, and a lone interposed piece is marked as the
/// block.
fn cast_ray(piece: Piece, from: Square, df: i8, dr: i8, ctx: &ScanContext, scan: &mut Scan) {
    let start = scan.danger.len();
    scan.danger.push(DangerSquare {
        king_can_go: true,
        is_piece_here: true,
        ..DangerSquare::attacked(from, from)
    });

    let mut open = true;
    let mut shielded = false;
    let mut hits_king = false;
    let mut interposed = 0u8;
    let mut first_blocker = None;

    let mut current = from.offset(df, dr);
    while let Some(sq) = current {
        let own = ctx.own.get(sq);
        let rival = ctx.rival.get(sq);
        let occupied = own != Occupant::Empty || rival != Occupant::Empty;

        if open {
            scan.moves.push(if own != Occupant::Empty {
                Move::protective(piece, from, sq)
            } else {
                Move::normal(piece, from, sq)
            });
        }

        scan.danger.push(DangerSquare {
            king_can_go: shielded,
            is_piece_here: occupied,
            ..DangerSquare::attacked(sq, from)
        });

        if occupied {
            if open {
                open = false;
                first_blocker = Some(scan.danger.len() - 1);
            }
            if rival == Occupant::King {
                hits_king = true;
            } else {
                if !hits_king {
                    interposed += 1;
                }
                shielded = true;
            }
        }

        current = sq.offset(df, dr);
    }

    if hits_king {
        for (index, entry) in scan.danger.iter_mut().enumerate().skip(start) {
            entry.threats_king = true;
            entry.blocks_attack = interposed == 1 && first_blocker == Some(index);
        }
    }
}

fn push_castling(from: Square, ctx: &ScanContext, scan: &mut Scan) {
    let home = Square::new(File::E, ctx.color.back_rank());
    if from != home {
        return;
    }

    let rook_at = |sq: Square| ctx.castling.has(sq) && ctx.own.get(sq) == Occupant::Piece;
    let all_empty = |files: &[File]| files.iter().all(|&f| !ctx.is_occupied(home.with_file(f)));

    if rook_at(CastlingRights::kingside_rook(ctx.color)) && all_empty(&[File::F, File::G]) {
        scan.moves.push(Move::new(
            Piece::King,
            from,
            home.with_file(File::G),
            MoveFlag::CastleKingside,
        ));
    }
    if rook_at(CastlingRights::queenside_rook(ctx.color)) && all_empty(&[File::B, File::C, File::D]) {
        scan.moves.push(Move::new(
            Piece::King,
            from,
            home.with_file(File::C),
            MoveFlag::CastleQueenside,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{diagram, sq};
    use chess_core::Color;

    fn playable(scan: &Scan) -> Vec<String> {
        let mut moves: Vec<String> = scan
            .moves
            .iter()
            .filter(|m| !m.is_protective())
            .map(|m| m.to_coordinate())
            .collect();
        moves.sort();
        moves
    }

    #[test]
    fn startpos_pawns() {
        let pos = Position::startpos();
        let ctx = ScanContext::active(&pos);
        let pawns: Vec<Square> = pos.squares_of(Piece::Pawn, Color::White).collect();
        let scan = scan_pawns(&pawns, &ctx);
        assert_eq!(scan.moves.len(), 16);
        assert_eq!(
            scan.moves.iter().filter(|m| m.flag() == MoveFlag::DoublePush).count(),
            8
        );
        // Edge pawns attack one square, the rest two.
        assert_eq!(scan.danger.len(), 14);
    }

    #[test]
    fn pawn_captures_and_promotions() {
        let pos = diagram("1n2k3/P7/8/8/8/8/8/4K3", Color::White, "-", None);
        let ctx = ScanContext::active(&pos);
        let scan = scan_pawns(&[sq("a7")], &ctx);
        assert_eq!(playable(&scan), vec!["a7a8", "a7b8"]);
        assert!(scan.moves.iter().all(|m| m.flag() == MoveFlag::Promotion));
    }

    #[test]
    fn pawn_en_passant_only_for_active_side() {
        let pos = diagram("4k3/8/8/3pP3/8/8/8/4K3", Color::White, "-", Some("d6"));
        let active = ScanContext::active(&pos);
        let scan = scan_pawns(&[sq("e5")], &active);
        let ep: Vec<_> = scan
            .moves
            .iter()
            .filter(|m| m.flag() == MoveFlag::EnPassant)
            .collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].to(), sq("d6"));

        let passive = ScanContext::passive(&pos, Color::White);
        let scan = scan_pawns(&[sq("e5")], &passive);
        assert!(scan.moves.iter().all(|m| m.flag() != MoveFlag::EnPassant));
    }

    #[test]
    fn knight_from_corner() {
        let pos = Position::startpos();
        let ctx = ScanContext::active(&pos);
        let scan = scan_knights(&[Square::B1], &ctx);
        assert_eq!(playable(&scan), vec!["b1a3", "b1c3"]);
        // d2 is defended.
        assert!(scan
            .moves
            .iter()
            .any(|m| m.is_protective() && m.to() == sq("d2")));
        assert_eq!(scan.danger.len(), 3);
    }

    #[test]
    fn rook_ray_stops_at_capture() {
        let pos = diagram("4k3/8/8/p7/8/8/8/R3K3", Color::White, "-", None);
        let ctx = ScanContext::active(&pos);
        let scan = scan_rooks(&[Square::A1], &ctx);
        assert_eq!(
            playable(&scan),
            vec!["a1a2", "a1a3", "a1a4", "a1a5", "a1b1", "a1c1", "a1d1"]
        );
        assert!(scan
            .moves
            .iter()
            .any(|m| m.is_protective() && m.to() == Square::E1));
    }

    #[test]
    fn queen_covers_both_line_kinds() {
        let pos = diagram("4k3/8/8/8/3Q4/8/8/4K3", Color::White, "-", None);
        let ctx = ScanContext::active(&pos);
        let scan = scan_queens(&[sq("d4")], &ctx);
        assert_eq!(playable(&scan).len(), 27);
    }

    #[test]
    fn checking_ray_is_tagged() {
        let pos = diagram("4k3/8/8/8/8/8/8/r2K4", Color::White, "-", None);
        let ctx = ScanContext::passive(&pos, Color::Black);
        let scan = scan_rooks(&[Square::A1], &ctx);
        let tagged: Vec<Square> = scan
            .danger
            .iter()
            .filter(|e| e.threats_king)
            .map(|e| e.square)
            .collect();
        assert!(tagged.contains(&Square::A1));
        assert!(tagged.contains(&Square::C1));
        assert!(tagged.contains(&Square::H1));
        assert!(!tagged.contains(&sq("a2")));
        assert!(scan.moves.iter().any(|m| m.to() == Square::D1));
    }

    #[test]
    fn castling_candidates() {
        let pos = diagram("r3k2r/8/8/8/8/8/8/R3K2R", Color::White, "KQkq", None);
        let ctx = ScanContext::active(&pos);
        let scan = scan_king(&[Square::E1], &ctx);
        assert!(scan.moves.contains(&Move::new(
            Piece::King,
            Square::E1,
            Square::G1,
            MoveFlag::CastleKingside
        )));
        assert!(scan.moves.contains(&Move::new(
            Piece::King,
            Square::E1,
            Square::C1,
            MoveFlag::CastleQueenside
        )));

        let blocked = diagram("r3k2r/8/8/8/8/8/8/RN2K1NR", Color::White, "KQkq", None);
        let scan = scan_king(&[Square::E1], &ScanContext::active(&blocked));
        assert!(scan.moves.iter().all(|m| !m.flag().is_castling()));
    }

    #[test]
    fn passive_side_never_castles() {
        let pos = diagram("r3k2r/8/8/8/8/8/8/R3K2R", Color::White, "KQkq", None);
        let ctx = ScanContext::passive(&pos, Color::Black);
        let scan = scan_king(&[Square::E8], &ctx);
        assert!(scan.moves.iter().all(|m| !m.flag().is_castling()));
    }
}

//! Move application.
//!
//! [`make_move`] is the unchecked primitive used by the generator and perft;
//! [`apply_move`] is the caller-facing entry that validates against a legal
//! move list and asks a [`PromotionPolicy`] for the promoted piece.

use crate::position::{Cell, Position};
use chess_core::{Color, File, Move, MoveFlag, Piece, Square};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

/// Chooses the piece a pawn becomes on the last rank.
pub trait PromotionPolicy {
    fn choose(&mut self, color: Color, square: Square) -> Piece;
}

impl<F> PromotionPolicy for F
where
    F: FnMut(Color, Square) -> Piece,
{
    fn choose(&mut self, color: Color, square: Square) -> Piece {
        self(color, square)
    }
}

/// Always promotes to a queen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueenPromotion;

impl PromotionPolicy for QueenPromotion {
    fn choose(&mut self, _color: Color, _square: Square) -> Piece {
        Piece::Queen
    }
}

/// Always promotes to the same piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPromotion(pub Piece);

impl PromotionPolicy for FixedPromotion {
    fn choose(&mut self, _color: Color, _square: Square) -> Piece {
        self.0
    }
}

/// Picks uniformly among knight, bishop, rook and queen.
#[derive(Debug, Clone)]
pub struct RandomPromotion<R> {
    rng: R,
}

impl<R: Rng> RandomPromotion<R> {
    pub fn new(rng: R) -> Self {
        RandomPromotion { rng }
    }
}

impl RandomPromotion<rand::rngs::ThreadRng> {
    /// Uses the thread-local generator.
    pub fn from_thread_rng() -> Self {
        RandomPromotion::new(rand::thread_rng())
    }
}

impl<R: Rng> PromotionPolicy for RandomPromotion<R> {
    fn choose(&mut self, _color: Color, _square: Square) -> Piece {
        Piece::PROMOTIONS
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Piece::Queen)
    }
}

/// Result of [`apply_move`]: the next position, or an unchanged copy when
/// the requested move was not legal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub position: Position,
    pub accepted: bool,
}

/// Applies the move `from`-`to` if `legal_moves` contains it for the piece
/// standing on `from`.
///
/// A rejected request yields a copy of the input with `accepted == false`;
/// it is never an error.
pub fn apply_move<P>(
    position: &Position,
    legal_moves: &[Move],
    from: Square,
    to: Square,
    promotion: &mut P,
) -> Applied
where
    P: PromotionPolicy + ?Sized,
{
    let us = position.side_to_move();
    let chosen = match position.piece_at(from) {
        Some((piece, color)) if color == us => legal_moves
            .iter()
            .copied()
            .find(|m| !m.is_protective() && m.piece() == piece && m.from() == from && m.to() == to),
        _ => None,
    };

    let Some(m) = chosen else {
        debug!(%from, %to, side = %us, "rejected move not in the legal set");
        return Applied {
            position: position.clone(),
            accepted: false,
        };
    };

    let promoted = if m.flag() == MoveFlag::Promotion {
        match promotion.choose(us, to) {
            piece @ (Piece::Knight | Piece::Bishop | Piece::Rook | Piece::Queen) => piece,
            other => {
                warn!(piece = %other, "promotion policy chose an invalid piece, using queen");
                Piece::Queen
            }
        }
    } else {
        m.piece()
    };

    Applied {
        position: make_move(position, m, promoted),
        accepted: true,
    }
}

/// Plays a pseudo-legal move without validation and returns the next
/// position.
///
/// `promotion` is the piece placed on the destination when the move carries
/// the promotion flag; it is ignored otherwise.
pub fn make_move(position: &Position, m: Move, promotion: Piece) -> Position {
    let us = position.side_to_move();
    let them = us.opposite();
    let (from, to) = (m.from(), m.to());
    let mut next = position.clone();

    let placed = if m.flag() == MoveFlag::Promotion {
        promotion
    } else {
        m.piece()
    };
    next.cells[from.index() as usize] = Cell::Empty;
    next.cells[to.index() as usize] = Cell::Occupied(placed, us);

    match m.flag() {
        MoveFlag::EnPassant => {
            let captured = Square::new(to.file(), from.rank());
            next.cells[captured.index() as usize] = Cell::Empty;
        }
        MoveFlag::CastleKingside => relocate(&mut next, from.with_file(File::H), from.with_file(File::F)),
        MoveFlag::CastleQueenside => relocate(&mut next, from.with_file(File::A), from.with_file(File::D)),
        _ => {}
    }

    if m.piece() == Piece::King {
        next.castling.remove_color(us);
    }
    next.castling.remove(from);
    next.castling.remove(to);

    next.en_passant = None;
    if m.flag() == MoveFlag::DoublePush {
        let rival_pawn = Cell::Occupied(Piece::Pawn, them);
        let capturable = [-1, 1]
            .into_iter()
            .filter_map(|df| to.offset(df, 0))
            .any(|sq| position.cell(sq) == rival_pawn);
        if capturable {
            next.en_passant = from.offset(0, us.pawn_direction());
        }
    }

    next.side_to_move = them;
    next
}

fn relocate(position: &mut Position, from: Square, to: Square) {
    let cell = position.cells[from.index() as usize];
    position.cells[from.index() as usize] = Cell::Empty;
    position.cells[to.index() as usize] = cell;
}

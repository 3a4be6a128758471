//! Chess rules engine.
//!
//! This crate provides:
//! - [`Position`] - board cells plus side to move, castling markers and en passant square
//! - [`generate_legal_moves`] - legal move generation with check detection
//! - [`apply_move`] - validated move application with a pluggable [`PromotionPolicy`]
//! - [`notate`] / [`describe_move`] - algebraic move notation
//! - [`GameRecord`] - a played game with per-ply history and status
//!
//! # Architecture
//!
//! Each piece kind has a scanner that walks the board from every piece of
//! that kind and emits pseudo-legal moves together with annotated attacked
//! squares. The opponent's annotations are folded into a [`DangerZone`] that
//! records where the king may go, which pieces are pinned and which squares
//! block a check. The legality filter combines that zone with the side to
//! move's candidates. Every operation returns new values; positions are
//! never mutated in place.
//!
//! # Example
//!
//! ```
//! use chess_engine::{apply_move, generate_legal_moves, new_game, QueenPromotion};
//! use chess_core::Square;
//!
//! let position = new_game();
//! let legal = generate_legal_moves(&position);
//! assert_eq!(legal.moves.len(), 20);
//!
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let e4 = Square::from_algebraic("e4").unwrap();
//! let applied = apply_move(&position, legal.moves.as_slice(), e2, e4, &mut QueenPromotion);
//! assert!(applied.accepted);
//! ```

mod apply;
#[cfg(test)]
mod fixtures;
mod game;
pub mod movegen;
mod notation;
mod position;

pub use apply::{
    apply_move, make_move, Applied, FixedPromotion, PromotionPolicy, QueenPromotion,
    RandomPromotion,
};
pub use game::{GameError, GameRecord, GameStatus, RecordEntry};
pub use movegen::{
    generate_legal_moves, is_king_attacked, DangerSquare, DangerZone, LegalMoves, MoveList,
};
pub use notation::{describe_move, notate};
pub use position::{Cell, CastlingRights, Position, PositionBuilder, PositionError};

/// The standard starting position.
pub fn new_game() -> Position {
    Position::startpos()
}

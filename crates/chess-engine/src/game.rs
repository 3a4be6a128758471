//! Game record: a start position plus the plies played from it.
//!
//! [`GameRecord`] keeps every intermediate position with the move and its
//! notation, and caches the legal moves of the latest position so callers
//! can query status and highlight targets without regenerating them.

use crate::apply::{apply_move, PromotionPolicy};
use crate::movegen::{generate_legal_moves, LegalMoves};
use crate::notation::describe_move;
use crate::Position;
use chess_core::{Move, Square};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// State of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    /// Derives the status from a legal move set.
    pub fn of(legal: &LegalMoves) -> Self {
        match (legal.in_check, legal.moves.is_empty()) {
            (true, true) => GameStatus::Checkmate,
            (false, true) => GameStatus::Stalemate,
            (true, false) => GameStatus::Check,
            (false, false) => GameStatus::Ongoing,
        }
    }

    /// Returns true for checkmate and stalemate.
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameStatus::Ongoing => "ongoing",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
        };
        f.write_str(text)
    }
}

/// Errors from [`GameRecord::play`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("illegal move: {from}{to}")]
    IllegalMove { from: Square, to: Square },

    #[error("game has already ended in {0}")]
    GameAlreadyOver(GameStatus),

    #[error("invalid coordinate move: {0:?}")]
    InvalidCoordinates(String),
}

/// One played ply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEntry {
    /// The move as generated.
    pub mov: Move,
    /// Position after the move.
    pub position: Position,
    /// Algebraic notation of the move.
    pub notation: String,
}

/// A game from a start position, one entry per ply.
#[derive(Debug, Clone)]
pub struct GameRecord {
    start: Position,
    entries: Vec<RecordEntry>,
    legal: LegalMoves,
}

impl Default for GameRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRecord {
    /// Starts a game from the standard position.
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    /// Starts a game from a custom position.
    pub fn from_position(start: Position) -> Self {
        let legal = generate_legal_moves(&start);
        GameRecord {
            start,
            entries: Vec::new(),
            legal,
        }
    }

    /// The current position.
    pub fn position(&self) -> &Position {
        self.entries.last().map_or(&self.start, |entry| &entry.position)
    }

    pub fn start_position(&self) -> &Position {
        &self.start
    }

    /// Position after `ply` plies; ply 0 is the start.
    pub fn position_at(&self, ply: usize) -> Option<&Position> {
        match ply {
            0 => Some(&self.start),
            n => self.entries.get(n - 1).map(|entry| &entry.position),
        }
    }

    pub fn entries(&self) -> &[RecordEntry] {
        &self.entries
    }

    /// Number of plies played.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Legal moves of the current position.
    pub fn legal_moves(&self) -> &LegalMoves {
        &self.legal
    }

    pub fn status(&self) -> GameStatus {
        GameStatus::of(&self.legal)
    }

    /// Notation of every ply in order.
    pub fn notations(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.notation.as_str())
    }

    /// Plays `from`-`to` for the side to move.
    pub fn play<P>(&mut self, from: Square, to: Square, promotion: &mut P) -> Result<&RecordEntry, GameError>
    where
        P: PromotionPolicy + ?Sized,
    {
        let status = self.status();
        if status.is_over() {
            return Err(GameError::GameAlreadyOver(status));
        }

        let before = self.position().clone();
        let legal = self.legal.moves.as_slice();
        let applied = apply_move(&before, legal, from, to, promotion);
        if !applied.accepted {
            return Err(GameError::IllegalMove { from, to });
        }

        let mov = self
            .legal
            .moves
            .iter()
            .copied()
            .find(|m| m.from() == from && m.to() == to)
            .ok_or(GameError::IllegalMove { from, to })?;
        let notation = describe_move(&before, legal, mov, &applied.position);

        self.legal = generate_legal_moves(&applied.position);
        debug!(ply = self.entries.len() + 1, %notation, status = %GameStatus::of(&self.legal), "played move");

        self.entries.push(RecordEntry {
            mov,
            position: applied.position,
            notation,
        });
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Plays a move written in coordinate form, `e2e4` or `e2-e4`.
    pub fn play_coordinates<P>(&mut self, text: &str, promotion: &mut P) -> Result<&RecordEntry, GameError>
    where
        P: PromotionPolicy + ?Sized,
    {
        let (from, to) =
            Move::parse_squares(text).ok_or_else(|| GameError::InvalidCoordinates(text.to_string()))?;
        self.play(from, to, promotion)
    }
}

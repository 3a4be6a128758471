//! Algebraic move notation.
//!
//! [`notate`] renders a move from caller-supplied facts. [`describe_move`]
//! derives those facts from the positions around the move and adds
//! disambiguation and the promotion suffix.

use crate::movegen::generate_legal_moves;
use crate::Position;
use chess_core::{File, Move, MoveFlag, Piece, Square};

/// Renders a move in algebraic form, e.g. `Nf3`, `exd6`, `Qh4#`, `O-O`.
///
/// A king travelling two files is castling and renders as `O-O` (towards
/// the g-file) or `O-O-O` (towards the c-file) with no check suffix. A pawn
/// changing file is always a capture, whatever `is_capture` says.
pub fn notate(
    from: Square,
    to: Square,
    piece: Piece,
    is_capture: bool,
    is_check: bool,
    is_checkmate: bool,
) -> String {
    render(from, to, piece, is_capture, "", None, is_check, is_checkmate)
}

/// Renders a legal move played from `before` into `after`.
///
/// `legal` is the legal move list of `before`; it is used to add the origin
/// file or rank when another piece of the same kind could reach the same
/// square.
pub fn describe_move(before: &Position, legal: &[Move], m: Move, after: &Position) -> String {
    let is_capture = before.piece_at(m.to()).is_some() || m.flag() == MoveFlag::EnPassant;
    let promoted = match m.flag() {
        MoveFlag::Promotion => after.piece_at(m.to()).map(|(piece, _)| piece),
        _ => None,
    };
    let reply = generate_legal_moves(after);
    let disambiguation = disambiguate(legal, m);

    render(
        m.from(),
        m.to(),
        m.piece(),
        is_capture,
        &disambiguation,
        promoted,
        reply.in_check,
        reply.is_checkmate(),
    )
}

#[allow(clippy::too_many_arguments)]
fn render(
    from: Square,
    to: Square,
    piece: Piece,
    is_capture: bool,
    disambiguation: &str,
    promoted: Option<Piece>,
    is_check: bool,
    is_checkmate: bool,
) -> String {
    if piece == Piece::King && from.file().index().abs_diff(to.file().index()) == 2 {
        return match to.file() {
            File::G => "O-O".to_string(),
            _ => "O-O-O".to_string(),
        };
    }

    let mut text = String::new();
    let mut is_capture = is_capture;

    match piece.notation_letter() {
        Some(letter) => text.push(letter),
        None if from.file() != to.file() => {
            text.push(from.file().to_char());
            is_capture = true;
        }
        None => {}
    }

    text.push_str(disambiguation);
    if is_capture {
        text.push('x');
    }
    text.push_str(&to.to_algebraic());

    if let Some(letter) = promoted.and_then(Piece::notation_letter) {
        text.push('=');
        text.push(letter);
    }

    if is_checkmate {
        text.push('#');
    } else if is_check {
        text.push('+');
    }
    text
}

/// Origin file, rank, or both, when needed to tell `m` apart from a move of
/// another piece of the same kind to the same square.
fn disambiguate(legal: &[Move], m: Move) -> String {
    if matches!(m.piece(), Piece::Pawn | Piece::King) {
        return String::new();
    }

    let rivals: Vec<Square> = legal
        .iter()
        .filter(|other| other.piece() == m.piece() && other.to() == m.to() && other.from() != m.from())
        .map(|other| other.from())
        .collect();

    if rivals.is_empty() {
        return String::new();
    }

    let from = m.from();
    if rivals.iter().all(|sq| sq.file() != from.file()) {
        from.file().to_char().to_string()
    } else if rivals.iter().all(|sq| sq.rank() != from.rank()) {
        from.rank().to_char().to_string()
    } else {
        from.to_algebraic()
    }
}

//! Compact position setup for unit tests.

use crate::position::{CastlingRights, Position};
use chess_core::{Color, Piece, Square};

/// Builds a position from a rank-8-first placement diagram such as
/// `"r3k2r/8/8/8/8/8/8/R3K2R"`, the side to move, castling markers given as
/// any of `KQkq` (or `-`), and an optional en passant square.
pub(crate) fn diagram(placement: &str, side: Color, castling: &str, en_passant: Option<&str>) -> Position {
    let mut builder = Position::builder().side_to_move(side);

    for (row, text) in placement.split('/').enumerate() {
        let rank = 7 - row as u8;
        let mut file = 0u8;
        for c in text.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as u8;
            } else {
                let (piece, color): (Piece, Color) =
                    Piece::from_char(c).unwrap_or_else(|| panic!("bad diagram piece {c:?}"));
                builder = builder.piece(Square::from_coords(file, rank), piece, color);
                file += 1;
            }
        }
    }

    let mut rights = CastlingRights::NONE;
    for c in castling.chars() {
        rights = match c {
            'K' => rights.with(Square::H1),
            'Q' => rights.with(Square::A1),
            'k' => rights.with(Square::H8),
            'q' => rights.with(Square::A8),
            _ => rights,
        };
    }
    builder = builder.castling(rights);

    if let Some(ep) = en_passant {
        builder = builder.en_passant(sq(ep));
    }

    builder.build().expect("test diagram must describe a valid position")
}

/// Parses an algebraic square, panicking on typos.
pub(crate) fn sq(s: &str) -> Square {
    Square::from_algebraic(s).unwrap_or_else(|| panic!("bad square {s:?}"))
}

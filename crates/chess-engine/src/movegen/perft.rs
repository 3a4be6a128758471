//! Perft (performance test) for move generator validation.
//!
//! Perft counts the leaf nodes of the legal move tree to a given depth, to be
//! compared against published values. A promotion counts as one move since
//! the promoted piece is chosen on application, so reference positions with
//! promotions inside the searched depth report fewer nodes than the
//! published tables.

use super::generate_legal_moves;
use crate::apply::make_move;
use crate::Position;
use chess_core::Piece;

/// Counts the number of leaf nodes at the given depth.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let legal = generate_legal_moves(position);

    if depth == 1 {
        return legal.moves.len() as u64;
    }

    legal
        .moves
        .iter()
        .map(|&m| perft(&make_move(position, m, Piece::Queen), depth - 1))
        .sum()
}

/// Node count below each root move, sorted by coordinate notation.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(String, u64)> {
    let legal = generate_legal_moves(position);
    let mut results: Vec<(String, u64)> = legal
        .moves
        .iter()
        .map(|&m| {
            let nodes = if depth > 1 {
                perft(&make_move(position, m, Piece::Queen), depth - 1)
            } else {
                1
            };
            (m.to_coordinate(), nodes)
        })
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::diagram;
    use chess_core::Color;

    fn kiwipete() -> Position {
        diagram(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
            Color::White,
            "KQkq",
            None,
        )
    }

    fn position3() -> Position {
        diagram("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8", Color::White, "-", None)
    }

    #[test]
    fn perft_startpos_depth_1() {
        assert_eq!(perft(&Position::startpos(), 1), 20);
    }

    #[test]
    fn perft_startpos_depth_2() {
        assert_eq!(perft(&Position::startpos(), 2), 400);
    }

    #[test]
    fn perft_startpos_depth_3() {
        assert_eq!(perft(&Position::startpos(), 3), 8902);
    }

    #[test]
    fn perft_startpos_depth_4() {
        assert_eq!(perft(&Position::startpos(), 4), 197281);
    }

    // Castling, pins and en passant all within two plies.
    #[test]
    fn perft_kiwipete_depth_1() {
        assert_eq!(perft(&kiwipete(), 1), 48);
    }

    #[test]
    fn perft_kiwipete_depth_2() {
        assert_eq!(perft(&kiwipete(), 2), 2039);
    }

    #[test]
    fn perft_kiwipete_depth_3() {
        assert_eq!(perft(&kiwipete(), 3), 97862);
    }

    // Rank pin across an en passant capture.
    #[test]
    fn perft_position3_depth_1() {
        assert_eq!(perft(&position3(), 1), 14);
    }

    #[test]
    fn perft_position3_depth_2() {
        assert_eq!(perft(&position3(), 2), 191);
    }

    #[test]
    fn perft_position3_depth_3() {
        assert_eq!(perft(&position3(), 3), 2812);
    }

    #[test]
    fn perft_position3_depth_4() {
        assert_eq!(perft(&position3(), 4), 43238);
    }

    #[test]
    fn perft_divide_works() {
        let results = perft_divide(&Position::startpos(), 2);
        assert_eq!(results.len(), 20);
        assert!(results.iter().all(|(_, n)| *n == 20));
        let total: u64 = results.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 400);
        assert_eq!(results[0].0, "a2a3");
    }
}

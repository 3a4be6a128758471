//! Integration tests through the public API: positions built with
//! [`Position::builder`], moves played with [`apply_move`] and [`GameRecord`].

use chess_core::{Color, MoveFlag, Piece, Square};
use chess_engine::{
    apply_move, generate_legal_moves, is_king_attacked, new_game, CastlingRights, GameRecord,
    GameStatus, Position, QueenPromotion,
};

fn sq(s: &str) -> Square {
    Square::from_algebraic(s).unwrap()
}

fn play(position: &Position, from: &str, to: &str) -> Position {
    let legal = generate_legal_moves(position);
    let applied = apply_move(position, legal.moves.as_slice(), sq(from), sq(to), &mut QueenPromotion);
    assert!(applied.accepted, "{from}{to} should be legal in\n{position}");
    applied.position
}

#[test]
fn test_opening_sequence() {
    let mut position = new_game();
    for (from, to) in [("e2", "e4"), ("e7", "e5"), ("g1", "f3"), ("b8", "c6")] {
        position = play(&position, from, to);
    }
    assert_eq!(position.side_to_move(), Color::White);
    assert_eq!(position.piece_at(sq("c6")), Some((Piece::Knight, Color::Black)));
    assert_eq!(position.castling(), CastlingRights::ALL);
    assert!(!generate_legal_moves(&position).in_check);
}

#[test]
fn test_en_passant_window_is_one_ply() {
    let mut position = new_game();
    for (from, to) in [("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")] {
        position = play(&position, from, to);
    }
    assert_eq!(position.en_passant(), Some(sq("d6")));

    let legal = generate_legal_moves(&position);
    let ep = legal.moves.find(sq("e5"), sq("d6")).unwrap();
    assert_eq!(ep.flag(), MoveFlag::EnPassant);

    // Declining the capture closes the window.
    let declined = play(&play(&position, "h2", "h3"), "h7", "h6");
    assert!(generate_legal_moves(&declined)
        .moves
        .find(sq("e5"), sq("d6"))
        .is_none());

    let captured = play(&position, "e5", "d6");
    assert_eq!(captured.piece_at(sq("d5")), None);
}

#[test]
fn test_builder_position_checkmate() {
    // Back-rank mate.
    let position = Position::builder()
        .piece(sq("g1"), Piece::King, Color::White)
        .piece(sq("f2"), Piece::Pawn, Color::White)
        .piece(sq("g2"), Piece::Pawn, Color::White)
        .piece(sq("h2"), Piece::Pawn, Color::White)
        .piece(sq("e8"), Piece::Rook, Color::Black)
        .piece(sq("a8"), Piece::King, Color::Black)
        .piece(sq("a2"), Piece::Rook, Color::Black)
        .side_to_move(Color::Black)
        .build()
        .unwrap();

    let mated = play(&position, "e8", "e1");
    let legal = generate_legal_moves(&mated);
    assert!(legal.in_check);
    assert!(legal.is_checkmate());
    assert!(is_king_attacked(&mated, Color::White));
}

#[test]
fn test_record_scholars_mate() {
    let mut record = GameRecord::new();
    for text in ["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"] {
        record.play_coordinates(text, &mut QueenPromotion).unwrap();
    }
    assert_eq!(record.status(), GameStatus::Checkmate);
    assert_eq!(
        record.notations().collect::<Vec<_>>(),
        vec!["e4", "e5", "Bc4", "Nc6", "Qh5", "Nf6", "Qxf7#"]
    );
}

#[test]
fn test_castling_rights_lost_after_king_walk() {
    let position = Position::builder()
        .piece(Square::E1, Piece::King, Color::White)
        .piece(Square::H1, Piece::Rook, Color::White)
        .piece(Square::A1, Piece::Rook, Color::White)
        .piece(Square::E8, Piece::King, Color::Black)
        .castling(CastlingRights::NONE.with(Square::H1).with(Square::A1))
        .build()
        .unwrap();

    let walked = play(&play(&play(&position, "e1", "e2"), "e8", "e7"), "e2", "e1");
    let walked = play(&walked, "e7", "e8");
    assert_eq!(walked.castling(), CastlingRights::NONE);
    let legal = generate_legal_moves(&walked);
    assert!(legal.moves.iter().all(|m| !m.flag().is_castling()));
}

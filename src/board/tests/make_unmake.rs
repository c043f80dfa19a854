//! Make/unmake round-trip tests.

use super::{apply, find_move};
use crate::board::{Board, Color, Piece, Square};

fn snapshot(board: &Board) -> (String, u64, u8, Option<Square>, u32, bool) {
    (
        board.to_fen(),
        board.hash(),
        board.castling_rights,
        board.en_passant_target(),
        board.fifty_move_count(),
        board.in_check(),
    )
}

fn assert_round_trip(fen: &str, coordinate: &str) {
    let mut board = Board::from_fen(fen).expect("valid FEN");
    let before = snapshot(&board);

    let from: Square = coordinate[0..2].parse().expect("valid origin");
    let to: Square = coordinate[2..4].parse().expect("valid target");
    let promotion = coordinate
        .get(4..5)
        .map(|c| Piece::from_char(c.chars().next().expect("char")).expect("piece"));
    let mv = find_move(&mut board, from, to, promotion);

    board.make_move(&mv);
    board.unmake_move(false);

    assert_eq!(snapshot(&board), before, "state differs after unmaking {coordinate}");
}

#[test]
fn test_quiet_move_round_trips() {
    assert_round_trip(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "g1f3",
    );
}

#[test]
fn test_capture_round_trips() {
    assert_round_trip(
        "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2",
        "e4d5",
    );
}

#[test]
fn test_castle_round_trips() {
    assert_round_trip("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1g1");
    assert_round_trip("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1c1");
    assert_round_trip("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1", "e8g8");
}

#[test]
fn test_en_passant_round_trips() {
    assert_round_trip(
        "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3",
        "e5d6",
    );
}

#[test]
fn test_promotion_round_trips() {
    assert_round_trip("8/4P3/8/8/8/k7/8/K7 w - - 0 1", "e7e8q");
    assert_round_trip("8/4P3/8/8/8/k7/8/K7 w - - 0 1", "e7e8n");
}

#[test]
fn test_unmake_restores_piece_counts() {
    let mut board =
        Board::from_fen("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2")
            .expect("valid FEN");
    let pawns_before = board.piece_count(Color::Black, Piece::Pawn);

    let mv = find_move(&mut board, Square(3, 4), Square(4, 3), None);
    board.make_move(&mv);
    assert_eq!(board.piece_count(Color::Black, Piece::Pawn), pawns_before - 1);

    board.unmake_move(false);
    assert_eq!(board.piece_count(Color::Black, Piece::Pawn), pawns_before);
}

#[test]
fn test_castling_rights_revoked_and_restored() {
    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("valid FEN");

    let king_move = find_move(&mut board, Square(0, 4), Square(0, 5), None);
    board.make_move(&king_move);
    assert!(!board.has_castling_right(Color::White, true));
    assert!(!board.has_castling_right(Color::White, false));
    assert!(board.has_castling_right(Color::Black, true));

    board.unmake_move(false);
    assert!(board.has_castling_right(Color::White, true));
    assert!(board.has_castling_right(Color::White, false));
}

#[test]
fn test_rook_capture_revokes_castling_rights() {
    let mut board =
        Board::from_fen("r3k2r/8/8/8/8/8/8/1R2K2R w Kkq - 0 1").expect("valid FEN");

    // Rb1xb8 does not touch a8/h8; rights survive.
    let quiet = find_move(&mut board, Square(0, 1), Square(7, 1), None);
    board.make_move(&quiet);
    assert!(board.has_castling_right(Color::Black, true));
    board.unmake_move(false);

    // Capturing the h8 rook revokes Black's kingside right.
    let mut board =
        Board::from_fen("r3k2r/8/8/8/8/7R/8/4K3 w kq - 0 1").expect("valid FEN");
    let capture = find_move(&mut board, Square(2, 7), Square(7, 7), None);
    board.make_move(&capture);
    assert!(!board.has_castling_right(Color::Black, true));
    assert!(board.has_castling_right(Color::Black, false));

    board.unmake_move(false);
    assert!(board.has_castling_right(Color::Black, true));
}

#[test]
fn test_temporary_unmake_allows_redo() {
    let mut board = Board::new();
    apply(&mut board, "e2e4");
    apply(&mut board, "e7e5");
    let fen_after = board.to_fen();
    let hash_after = board.hash();

    board.unmake_move(true);
    board.unmake_move(true);
    assert_eq!(board.ply(), 0);

    board.redo_move();
    board.redo_move();
    assert_eq!(board.to_fen(), fen_after);
    assert_eq!(board.hash(), hash_after);
}

#[test]
fn test_permanent_unmake_clears_redo() {
    let mut board = Board::new();
    apply(&mut board, "e2e4");
    board.unmake_move(false);

    let ply = board.ply();
    board.redo_move();
    assert_eq!(board.ply(), ply, "cleared history slot must not replay");
}

#[test]
fn test_fifty_move_counter_updates() {
    let mut board = Board::new();
    apply(&mut board, "g1f3");
    assert_eq!(board.fifty_move_count(), 1);
    apply(&mut board, "g8f6");
    assert_eq!(board.fifty_move_count(), 2);
    apply(&mut board, "e2e4");
    assert_eq!(board.fifty_move_count(), 0, "pawn move resets the counter");
}

#[test]
fn test_null_move_round_trips() {
    let mut board = Board::new();
    let side = board.side_to_move();
    let ply = board.ply();

    board.make_null_move();
    assert_eq!(board.side_to_move(), side.opponent());
    assert_eq!(board.ply(), ply + 1);

    board.unmake_null_move();
    assert_eq!(board.side_to_move(), side);
    assert_eq!(board.ply(), ply);
}

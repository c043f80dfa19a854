//! Move generation tests, perft included.

use super::{apply, find_move};
use crate::board::{Board, Outcome, Piece, Square};

fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = board.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for m in moves.iter() {
        board.make_move(m);
        nodes += perft(board, depth - 1);
        board.unmake_move(false);
    }
    nodes
}

#[test]
fn test_start_position_has_20_moves() {
    let mut board = Board::new();
    assert_eq!(board.legal_moves().len(), 20);
}

#[test]
fn test_perft_from_start() {
    let mut board = Board::new();
    assert_eq!(perft(&mut board, 1), 20);
    assert_eq!(perft(&mut board, 2), 400);
    assert_eq!(perft(&mut board, 3), 8902);
}

#[test]
fn test_perft_depth_4() {
    let mut board = Board::new();
    assert_eq!(perft(&mut board, 4), 197_281);
}

#[test]
fn test_fools_mate_is_checkmate() {
    let mut board = Board::new();
    for coordinate in ["f2f3", "e7e5", "g2g4", "d8h4"] {
        apply(&mut board, coordinate);
    }

    assert!(board.legal_moves().is_empty());
    let state = board.game_state().expect("game should be over");
    assert_eq!(state.outcome, Outcome::BlackWins);
    assert_eq!(state.reason, "checkmate");
    assert_eq!(board.last_move().san(), "Qh4#");
}

#[test]
fn test_stalemate_classification() {
    // Black to move with no moves and no check.
    let mut board = Board::from_fen("k7/8/1Q6/8/8/8/8/7K b - - 0 1").expect("valid FEN");
    assert!(board.legal_moves().is_empty());
    let state = board.game_state().expect("game should be over");
    assert_eq!(state.outcome, Outcome::Draw);
    assert_eq!(state.reason, "stalemate");
}

#[test]
fn test_castling_generated_when_clear() {
    let mut board =
        Board::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 0 1").expect("valid FEN");
    let moves = board.legal_moves();
    assert!(moves
        .iter()
        .any(|m| m.is_castle_kingside() && m.from() == Square(0, 4)));
    assert!(moves
        .iter()
        .any(|m| m.is_castle_queenside() && m.from() == Square(0, 4)));
}

#[test]
fn test_castling_through_attack_rejected() {
    // Black rook on f8 covers f1, the kingside transit square.
    let mut board =
        Board::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1").expect("valid FEN");
    let moves = board.legal_moves();
    assert!(!moves.iter().any(|m| m.is_castle_kingside()));
    assert!(moves.iter().any(|m| m.is_castle_queenside()));
}

#[test]
fn test_castling_out_of_check_rejected() {
    let mut board =
        Board::from_fen("4k3/8/8/8/8/8/4r3/R3K2R w KQ - 0 1").expect("valid FEN");
    let moves = board.legal_moves();
    assert!(!moves.iter().any(|m| m.is_castling()));
}

#[test]
fn test_en_passant_generated_and_flagged() {
    let mut board = Board::new();
    for coordinate in ["e2e4", "a7a6", "e4e5", "d7d5"] {
        apply(&mut board, coordinate);
    }

    assert_eq!(board.en_passant_target(), Some(Square(5, 3)));
    let mv = find_move(&mut board, Square(4, 4), Square(5, 3), None);
    assert!(mv.is_en_passant());
    assert!(mv.is_capture());
    assert_eq!(mv.captured().map(|(_, p)| p), Some(Piece::Pawn));
}

#[test]
fn test_promotion_generates_all_four_pieces() {
    let mut board = Board::from_fen("8/4P3/8/8/8/k7/8/K7 w - - 0 1").expect("valid FEN");
    let moves = board.legal_moves();
    let promotions: Vec<Piece> = moves
        .iter()
        .filter(|m| m.from() == Square(6, 4))
        .filter_map(|m| m.promotion())
        .collect();
    assert_eq!(promotions.len(), 4);
    for piece in [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight] {
        assert!(promotions.contains(&piece));
    }
}

#[test]
fn test_pinned_piece_cannot_move() {
    // The e-file knight is pinned against the king by the black rook.
    let mut board = Board::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").expect("valid FEN");
    let moves = board.legal_moves();
    assert!(!moves.iter().any(|m| m.from() == Square(1, 4)));
}

#[test]
fn test_captures_only_mode_generates_captures() {
    let mut board = Board::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").expect("valid FEN");
    let mut captures = crate::board::MoveList::new();
    board.generate_legal_moves(&mut captures, true);
    assert!(captures.iter().all(|m| m.is_capture()));
    assert!(captures
        .iter()
        .any(|m| m.from() == Square(3, 4) && m.to() == Square(4, 3)));
}

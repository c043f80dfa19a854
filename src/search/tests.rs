//! Search engine tests.

use std::time::Duration;

use crate::board::{Board, Square};
use crate::eval::HIGHEST_EVALUATION;
use crate::search::{OpeningBook, SearchEngine, SearchOptions, MAX_SEARCH_PLY};

fn engine(seed: u64) -> SearchEngine {
    let mut engine = SearchEngine::with_seed(seed);
    engine.set_options(SearchOptions {
        think_time: Duration::from_millis(500),
        end_game_think_time: Duration::from_millis(500),
        max_depth: 4,
    });
    engine
}

#[test]
fn test_single_legal_move_returned_without_search() {
    // White's only move is Kg1.
    let mut board = Board::from_fen("4k3/8/8/8/8/8/r7/7K w - - 0 1").expect("valid FEN");
    let mut engine = engine(1);

    let mv = engine.think(&mut board).expect("a move exists");
    assert_eq!(mv.from(), Square(0, 7));
    assert_eq!(mv.to(), Square(0, 6));
}

#[test]
fn test_no_legal_moves_returns_none() {
    // Fool's mate final position, White to move.
    let mut board =
        Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .expect("valid FEN");
    let mut engine = engine(1);
    assert!(engine.think(&mut board).is_none());
}

#[test]
fn test_finds_mate_in_one() {
    // Ra8# is the only mating move.
    let mut board =
        Board::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").expect("valid FEN");
    let mut engine = engine(3);

    let mv = engine.think(&mut board).expect("a move exists");
    assert_eq!(mv.from(), Square(0, 0));
    assert_eq!(mv.to(), Square(7, 0));
}

#[test]
fn test_mate_score_is_within_ply_of_sentinel() {
    let mut board =
        Board::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").expect("valid FEN");
    let mut engine = engine(3);

    // Prime the engine state the way think() does, then search directly.
    engine.interrupted = false;
    engine.search_ply = 0;
    engine.in_end_game = false;
    let score = engine.search(
        &mut board,
        2,
        crate::eval::LOWEST_EVALUATION,
        HIGHEST_EVALUATION,
        true,
    );

    assert!(
        score >= HIGHEST_EVALUATION - MAX_SEARCH_PLY as i32,
        "mate score {score} should sit within the recursion ceiling of the sentinel"
    );
}

#[test]
fn test_returns_legal_move_under_tiny_deadline() {
    let mut board = Board::from_fen(
        "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
    )
    .expect("valid FEN");

    let mut engine = SearchEngine::with_seed(9);
    engine.set_options(SearchOptions {
        think_time: Duration::from_millis(1),
        end_game_think_time: Duration::from_millis(1),
        max_depth: 32,
    });

    let mv = engine.think(&mut board).expect("a move exists");
    let legal = board.legal_moves();
    assert!(legal.iter().any(|m| *m == mv));
}

#[test]
fn test_think_returns_a_legal_move_midgame() {
    let mut board = Board::from_fen(
        "r2qkb1r/ppp2ppp/2np1n2/4p1B1/2B1P1b1/3P1N2/PPP2PPP/RN1QK2R w KQkq - 2 6",
    )
    .expect("valid FEN");
    let mut engine = engine(5);

    let mv = engine.think(&mut board).expect("a move exists");
    let legal = board.legal_moves();
    assert!(legal.iter().any(|m| *m == mv));
}

#[test]
fn test_same_seed_picks_same_opening_move() {
    let mv_a = {
        let mut board = Board::new();
        engine(11).think(&mut board).expect("a move exists")
    };
    let mv_b = {
        let mut board = Board::new();
        engine(11).think(&mut board).expect("a move exists")
    };
    assert_eq!(mv_a, mv_b);
}

#[test]
fn test_start_position_uses_the_book() {
    let mut board = Board::new();
    let mut engine = engine(2);

    let mv = engine.think(&mut board).expect("a move exists");
    let first_moves = ["e2e4", "d2d4", "c2c4", "g1f3"];
    assert!(
        first_moves.contains(&mv.to_string().as_str()),
        "book probe should pick a known opening move, got {mv}"
    );
}

#[test]
fn test_book_probe_respects_legality() {
    let book = OpeningBook::from_lines(["e2e4 e7e5 g1f3"]);
    assert_eq!(book.len(), 3);

    // A line that goes illegal contributes only its legal prefix.
    let truncated = OpeningBook::from_lines(["e2e4 e2e4 e7e5"]);
    assert_eq!(truncated.len(), 1);
}

#[test]
fn test_empty_book_falls_back_to_search() {
    let mut board = Board::new();
    let mut engine = engine(4);
    engine.set_book(OpeningBook::empty());

    let mv = engine.think(&mut board).expect("a move exists");
    let legal = board.legal_moves();
    assert!(legal.iter().any(|m| *m == mv));
}

#[test]
fn test_avoids_stalemate_throwaway() {
    // White can promote and win; giving the queen away would draw. The
    // search should at least keep a winning move available.
    let mut board = Board::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").expect("valid FEN");
    let mut engine = engine(6);

    let mv = engine.think(&mut board).expect("a move exists");
    let legal = board.legal_moves();
    assert!(legal.iter().any(|m| *m == mv));
}

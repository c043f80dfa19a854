//! Board unit tests.

mod make_unmake;
mod movegen;

use super::{Board, Move, Piece, Square};

/// Find a legal move by origin, destination and promotion piece.
pub(crate) fn find_move(
    board: &mut Board,
    from: Square,
    to: Square,
    promotion: Option<Piece>,
) -> Move {
    for m in board.legal_moves().iter() {
        if m.from() == from && m.to() == to && m.promotion() == promotion {
            return *m;
        }
    }
    panic!("expected move {from}{to} not found");
}

/// Apply a move given in coordinate notation ("e2e4", "e7e8q").
pub(crate) fn apply(board: &mut Board, coordinate: &str) {
    let from: Square = coordinate[0..2].parse().expect("valid origin square");
    let to: Square = coordinate[2..4].parse().expect("valid target square");
    let promotion = coordinate.get(4..5).map(|c| {
        Piece::from_char(c.chars().next().expect("promotion char")).expect("valid promotion")
    });
    let mv = find_move(board, from, to, promotion);
    board.make_move(&mv);
}

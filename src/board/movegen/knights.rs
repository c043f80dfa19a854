//! Knight move generation.

use super::super::{Board, MoveList, Square};

const KNIGHT_LEAPS: [(isize, isize); 8] = [
    (1, -2),
    (2, -1),
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
];

impl Board {
    pub(crate) fn generate_knight_moves(
        &self,
        out: &mut MoveList,
        from: Square,
        only_captures: bool,
    ) {
        for (d_file, d_rank) in KNIGHT_LEAPS {
            self.add_move_to_square(out, from, d_file, d_rank, only_captures);
        }
    }
}

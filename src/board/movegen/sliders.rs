//! Sliding piece move generation: bishops, rooks, queens.

use super::super::{Board, MoveList, Square};
use super::Step;

const DIAGONALS: [(isize, isize); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
const LINES: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

impl Board {
    fn generate_ray_moves(
        &self,
        out: &mut MoveList,
        from: Square,
        directions: &[(isize, isize)],
        only_captures: bool,
    ) {
        for &(d_file, d_rank) in directions {
            for step in 1..=7 {
                let result =
                    self.add_move_to_square(out, from, d_file * step, d_rank * step, only_captures);
                if result != Step::Empty {
                    break;
                }
            }
        }
    }

    pub(crate) fn generate_bishop_moves(
        &self,
        out: &mut MoveList,
        from: Square,
        only_captures: bool,
    ) {
        self.generate_ray_moves(out, from, &DIAGONALS, only_captures);
    }

    pub(crate) fn generate_rook_moves(&self, out: &mut MoveList, from: Square, only_captures: bool) {
        self.generate_ray_moves(out, from, &LINES, only_captures);
    }

    pub(crate) fn generate_queen_moves(
        &self,
        out: &mut MoveList,
        from: Square,
        only_captures: bool,
    ) {
        self.generate_bishop_moves(out, from, only_captures);
        self.generate_rook_moves(out, from, only_captures);
    }
}

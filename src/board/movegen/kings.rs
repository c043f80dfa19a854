//! King move generation, castling included.

use super::super::{
    Board, Move, MoveList, Piece, Square, FLAG_CASTLE_KINGSIDE, FLAG_CASTLE_QUEENSIDE,
};

const KING_STEPS: [(isize, isize); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

impl Board {
    pub(crate) fn generate_king_moves(&self, out: &mut MoveList, from: Square, only_captures: bool) {
        for (d_file, d_rank) in KING_STEPS {
            self.add_move_to_square(out, from, d_file, d_rank, only_captures);
        }

        if only_captures {
            return;
        }

        // Castling: gated on rights and empty transit squares here; the
        // legality filter rejects castling out of or through check.
        let (color, _) = self.piece_at(from).expect("generation from occupied square");
        let back = color.back_rank();
        let mover = (color, Piece::King);

        if self.has_castling_right(color, true)
            && self.is_empty(Square(back, 5))
            && self.is_empty(Square(back, 6))
        {
            out.push(Move::new(
                FLAG_CASTLE_KINGSIDE,
                from,
                Square(back, 6),
                mover,
                None,
            ));
        }
        if self.has_castling_right(color, false)
            && self.is_empty(Square(back, 1))
            && self.is_empty(Square(back, 2))
            && self.is_empty(Square(back, 3))
        {
            out.push(Move::new(
                FLAG_CASTLE_QUEENSIDE,
                from,
                Square(back, 2),
                mover,
                None,
            ));
        }
    }
}

//! Pawn move generation: pushes, captures, en passant, promotions.

use super::super::{
    Board, Move, MoveList, Piece, Square, FLAG_CAPTURE, FLAG_DOUBLE_PAWN, FLAG_EN_PASSANT,
    FLAG_QUIET,
};

/// Promotion kind flags in generation order (queen first). OR-ing in
/// `FLAG_CAPTURE` yields the capturing variant.
const PROMO_FLAGS: [u16; 4] = [0b1011, 0b1010, 0b1001, 0b1000];

impl Board {
    pub(crate) fn generate_pawn_moves(&self, out: &mut MoveList, from: Square, only_captures: bool) {
        let (color, _) = self.piece_at(from).expect("generation from occupied square");
        let mover = (color, Piece::Pawn);
        let dir = color.pawn_direction();
        let promoting = from.rank() == color.pawn_promotion_from_rank();

        // Pushes
        if let Some(ahead) = from.offset(0, dir) {
            if !only_captures && self.is_empty(ahead) {
                if promoting {
                    for flag in PROMO_FLAGS {
                        out.push(Move::new(flag, from, ahead, mover, None));
                    }
                } else {
                    out.push(Move::new(FLAG_QUIET, from, ahead, mover, None));

                    if from.rank() == color.pawn_start_rank() {
                        if let Some(two_ahead) = from.offset(0, 2 * dir) {
                            if self.is_empty(two_ahead) {
                                out.push(Move::new(FLAG_DOUBLE_PAWN, from, two_ahead, mover, None));
                            }
                        }
                    }
                }
            }
        }

        // Diagonal captures
        for d_file in [-1, 1] {
            let Some(to) = from.offset(d_file, dir) else {
                continue;
            };
            if let Some(target) = self.piece_at(to) {
                if target.0 != color {
                    if promoting {
                        for flag in PROMO_FLAGS {
                            out.push(Move::new(
                                flag | FLAG_CAPTURE,
                                from,
                                to,
                                mover,
                                Some(target),
                            ));
                        }
                    } else {
                        out.push(Move::new(FLAG_CAPTURE, from, to, mover, Some(target)));
                    }
                }
            } else if Some(to) == self.en_passant_target {
                // The passed pawn stands beside the origin square.
                let beside = from.offset(d_file, 0).expect("en passant neighbor on board");
                if self.piece_at(beside) == Some((color.opponent(), Piece::Pawn)) {
                    out.push(Move::new(
                        FLAG_EN_PASSANT,
                        from,
                        to,
                        mover,
                        Some((color.opponent(), Piece::Pawn)),
                    ));
                }
            }
        }
    }
}

//! Move generation: pseudo-legal generators per piece plus the
//! make/verify/unmake legality filter.

mod kings;
mod knights;
mod pawns;
mod sliders;

use super::{Board, Move, MoveList, Piece, Square, FLAG_CAPTURE, FLAG_QUIET};

/// Outcome of probing one step along a ray or leap.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    OffBoard,
    Empty,
    Blocked,
}

impl Board {
    /// Generate the side to move's legal moves into `out`, assigning SAN
    /// notation to the generated set.
    ///
    /// In captures-only mode just the attack-pattern pseudo-legal moves are
    /// generated and no terminal classification happens. In full mode an
    /// empty result classifies the position as checkmate or stalemate.
    pub fn generate_legal_moves(&mut self, out: &mut MoveList, only_captures: bool) {
        out.clear();

        self.update_insufficient_material();
        self.update_threefold_repetition();
        if self.game_state().is_some() {
            return;
        }

        self.update_in_check();
        let currently_in_check = self.in_check;
        let playing = self.side_to_move;

        let mut pseudo = MoveList::new();
        self.generate_pseudo_legal(&mut pseudo, only_captures);

        for i in 0..pseudo.len() {
            let candidate = pseudo[i];
            let kingside = candidate.is_castle_kingside();
            let queenside = candidate.is_castle_queenside();

            self.make_move(&candidate);

            // Castling out of check is illegal regardless of replies.
            let mut legal = !((kingside || queenside) && currently_in_check);

            if legal {
                // For castling the replies must include quiet moves: an
                // attack on the empty rook-transit square shows up as a
                // quiet move onto it.
                let mut replies = MoveList::new();
                self.generate_pseudo_legal(&mut replies, !(kingside || queenside));

                let king = self.king_square(playing);
                let transit = if kingside {
                    Some(Square(playing.back_rank(), 5))
                } else if queenside {
                    Some(Square(playing.back_rank(), 3))
                } else {
                    None
                };

                for reply in replies.iter() {
                    if reply.to() == king || Some(reply.to()) == transit {
                        legal = false;
                        break;
                    }
                }
            }

            if legal {
                out.push(candidate);
            }

            self.unmake_move(false);
        }

        self.in_check = currently_in_check;

        if !only_captures && out.is_empty() {
            if self.in_check {
                self.flags.checkmated = Some(playing);
            } else {
                self.flags.stalemate = true;
            }
            self.set_checkmate_notation();
        } else {
            self.set_algebraic_notations(out);
        }
    }

    /// Convenience wrapper returning the legal-move list by value.
    #[must_use]
    pub fn legal_moves(&mut self) -> MoveList {
        let mut moves = MoveList::new();
        self.generate_legal_moves(&mut moves, false);
        moves
    }

    /// Generate pseudo-legal moves for the side to move.
    pub(crate) fn generate_pseudo_legal(&self, out: &mut MoveList, only_captures: bool) {
        out.clear();

        for idx in 0..64 {
            let square = Square::from_index(idx);
            let Some((color, piece)) = self.piece_at(square) else {
                continue;
            };
            if color != self.side_to_move {
                continue;
            }

            match piece {
                Piece::Pawn => self.generate_pawn_moves(out, square, only_captures),
                Piece::Knight => self.generate_knight_moves(out, square, only_captures),
                Piece::Bishop => self.generate_bishop_moves(out, square, only_captures),
                Piece::Rook => self.generate_rook_moves(out, square, only_captures),
                Piece::Queen => self.generate_queen_moves(out, square, only_captures),
                Piece::King => self.generate_king_moves(out, square, only_captures),
            }
        }
    }

    /// Try a single destination offset from `from`. Emits a quiet move or a
    /// capture and reports how the ray continues.
    pub(crate) fn add_move_to_square(
        &self,
        out: &mut MoveList,
        from: Square,
        d_file: isize,
        d_rank: isize,
        only_captures: bool,
    ) -> Step {
        let Some(to) = from.offset(d_file, d_rank) else {
            return Step::OffBoard;
        };

        let mover = self.piece_at(from).expect("generation from occupied square");

        match self.piece_at(to) {
            None => {
                if !only_captures {
                    out.push(Move::new(FLAG_QUIET, from, to, mover, None));
                }
                Step::Empty
            }
            Some(target) => {
                if target.0 != mover.0 {
                    out.push(Move::new(FLAG_CAPTURE, from, to, mover, Some(target)));
                }
                Step::Blocked
            }
        }
    }
}

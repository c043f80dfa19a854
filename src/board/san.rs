//! Standard algebraic notation for generated move sets.

use super::{Board, MoveList, Notation, Piece};

impl Board {
    /// Assign SAN to every move in a freshly generated legal-move set.
    ///
    /// Disambiguation needs the whole set: among same-piece moves sharing a
    /// destination the origin file is added when it alone disambiguates,
    /// else the rank, else both. Check and mate suffixes are applied later,
    /// once the move has actually been made.
    pub(crate) fn set_algebraic_notations(&self, moves: &mut MoveList) {
        for i in 0..moves.len() {
            let m = moves[i];
            let mut notation = Notation::default();

            if m.is_castling() {
                let text = if m.is_castle_kingside() { "O-O" } else { "O-O-O" };
                for c in text.chars() {
                    notation.push(c);
                }
                *moves[i].notation_mut() = notation;
                continue;
            }

            let (_, piece) = m.moved().expect("generated move has a mover");
            let from = m.from();

            if piece == Piece::Pawn {
                if m.is_capture() {
                    notation.push(from.file_char());
                }
            } else {
                notation.push(piece.letter());

                let mut unique = true;
                let mut unique_file = true;
                let mut unique_rank = true;
                for j in 0..moves.len() {
                    if i == j {
                        continue;
                    }
                    let other = moves[j];
                    if other.to() == m.to() && other.moved() == m.moved() {
                        unique = false;
                        if other.from().file() == from.file() {
                            unique_file = false;
                        }
                        if other.from().rank() == from.rank() {
                            unique_rank = false;
                        }
                    }
                }

                if !unique {
                    if unique_file {
                        notation.push(from.file_char());
                    } else if unique_rank {
                        notation.push(from.rank_char());
                    } else {
                        notation.push(from.file_char());
                        notation.push(from.rank_char());
                    }
                }
            }

            if m.is_capture() {
                notation.push('x');
            }

            notation.push(m.to().file_char());
            notation.push(m.to().rank_char());

            if let Some(promoted) = m.promotion() {
                notation.push('=');
                notation.push(promoted.letter());
            }

            *moves[i].notation_mut() = notation;
        }
    }

    /// Rewrite the mating move's '+' suffix to '#'.
    pub(crate) fn set_checkmate_notation(&mut self) {
        if self.flags.checkmated.is_none() || self.ply == 0 {
            return;
        }
        self.history[self.ply - 1].notation_mut().mark_checkmate();
        self.last_move = self.history[self.ply - 1];
    }
}

//! Applying and reverting moves.

use super::state::FIFTY_MOVE_LIMIT;
use super::{castle_bit, Board, Move, MoveList, Piece, Square};

impl Board {
    /// Apply a legal move.
    ///
    /// No-op if the origin square is empty, the move is null, or the game
    /// is already over; callers validate against the legal-move list first.
    pub fn make_move(&mut self, m: &Move) {
        if self.is_empty(m.from()) || m.is_null() || self.game_state().is_some() {
            return;
        }

        let (color, piece) = m.moved().expect("non-null move has a mover");
        let back = color.back_rank();

        if piece == Piece::King {
            if m.is_castle_kingside() {
                let rook = self.piece_at(Square(back, 7));
                self.place_piece(rook, Square(back, 5));
                self.place_piece(None, Square(back, 7));
                self.castled[color.index()] = true;
            } else if m.is_castle_queenside() {
                let rook = self.piece_at(Square(back, 0));
                self.place_piece(rook, Square(back, 3));
                self.place_piece(None, Square(back, 0));
                self.castled[color.index()] = true;
            }
            self.castling_rights &= !(castle_bit(color, true) | castle_bit(color, false));
        } else if piece == Piece::Rook {
            if m.from() == Square(back, 7) {
                self.castling_rights &= !castle_bit(color, true);
            } else if m.from() == Square(back, 0) {
                self.castling_rights &= !castle_bit(color, false);
            }
        }

        if let Some((victim_color, Piece::Rook)) = m.captured() {
            let victim_back = victim_color.back_rank();
            if m.to() == Square(victim_back, 7) {
                self.castling_rights &= !castle_bit(victim_color, true);
            } else if m.to() == Square(victim_back, 0) {
                self.castling_rights &= !castle_bit(victim_color, false);
            }
        }

        if m.is_en_passant() {
            let captured_square = m
                .to()
                .offset(0, -color.pawn_direction())
                .expect("en passant capture square on board");
            self.place_piece(None, captured_square);
        }

        let placed = match m.promotion() {
            Some(promoted) => (color, promoted),
            None => (color, piece),
        };
        self.place_piece(Some(placed), m.to());
        self.place_piece(None, m.from());

        self.history[self.ply] = *m;
        self.ply += 1;

        self.en_passant_target = if m.is_double_pawn_push() {
            Some(Square((m.from().rank() + m.to().rank()) / 2, m.from().file()))
        } else {
            None
        };

        if piece == Piece::Pawn || m.is_capture() {
            self.fifty_move_count = 0;
        } else {
            self.fifty_move_count += 1;
        }
        self.flags.fifty_move_rule = self.fifty_move_count >= FIFTY_MOVE_LIMIT;

        self.in_check = m.gives_check();
        self.side_to_move = self.side_to_move.opponent();

        self.hash = self.compute_hash();
        self.hash_history[self.ply - 1] = self.hash;
        self.last_move = *m;
    }

    /// Revert the last move. No-op at ply 0.
    ///
    /// With `temporary` the undone move stays in the history so
    /// [`Board::redo_move`] can replay it; otherwise its slot is cleared.
    pub fn unmake_move(&mut self, temporary: bool) {
        if self.ply == 0 {
            return;
        }

        self.clear_terminal_flags();

        self.ply -= 1;
        let last = self.history[self.ply];
        if !temporary {
            self.history[self.ply] = Move::null();
            self.hash_history[self.ply] = 0;
        }

        self.side_to_move = self.side_to_move.opponent();

        let (color, piece) = last.moved().expect("history move has a mover");
        let back = color.back_rank();

        // Rights are recomputed from the full history, never by inverting
        // the last change.
        if piece == Piece::King || piece == Piece::Rook {
            self.recompute_castle_rights(color);
        }
        if let Some((victim_color, Piece::Rook)) = last.captured() {
            self.recompute_castle_rights(victim_color);
        }

        if last.is_castle_kingside() {
            let rook = self.piece_at(Square(back, 5));
            self.place_piece(rook, Square(back, 7));
            self.place_piece(None, Square(back, 5));
        } else if last.is_castle_queenside() {
            let rook = self.piece_at(Square(back, 3));
            self.place_piece(rook, Square(back, 0));
            self.place_piece(None, Square(back, 3));
        }

        self.place_piece(last.moved(), last.from());
        if last.is_en_passant() {
            let captured_square = last
                .to()
                .offset(0, -color.pawn_direction())
                .expect("en passant capture square on board");
            self.place_piece(last.captured(), captured_square);
            self.place_piece(None, last.to());
        } else {
            self.place_piece(last.captured(), last.to());
        }

        let previous = if self.ply > 0 {
            self.history[self.ply - 1]
        } else {
            Move::null()
        };
        self.en_passant_target = if previous.is_double_pawn_push() {
            Some(Square(
                (previous.from().rank() + previous.to().rank()) / 2,
                previous.from().file(),
            ))
        } else {
            None
        };

        self.in_check = if self.ply > 0 {
            previous.gives_check()
        } else {
            self.initial_in_check
        };
        self.hash = if self.ply > 0 {
            self.hash_history[self.ply - 1]
        } else {
            self.initial_hash
        };
        self.last_move = previous;

        self.update_insufficient_material();
        self.update_fifty_move_count();
        self.update_threefold_repetition();
    }

    /// Replay the next history move after a temporary unmake, if present.
    pub fn redo_move(&mut self) {
        if let Some(next) = self.history_move(self.ply) {
            self.make_move(&next);
        }
    }

    /// Pass the turn. Only the search uses this, inside null-move pruning;
    /// the hash is left untouched and nothing is recorded in the history.
    pub(crate) fn make_null_move(&mut self) {
        self.ply += 1;
        self.side_to_move = self.side_to_move.opponent();
    }

    pub(crate) fn unmake_null_move(&mut self) {
        self.ply -= 1;
        self.side_to_move = self.side_to_move.opponent();
    }

    /// Re-derive the cached in-check flag by testing whether any opponent
    /// capture pattern targets the mover's king. On detection the move that
    /// delivered the check is retroactively marked, '+' notation included.
    pub(crate) fn update_in_check(&mut self) {
        let playing = self.side_to_move;

        self.side_to_move = playing.opponent();
        let mut strikes = MoveList::new();
        self.generate_pseudo_legal(&mut strikes, true);
        self.side_to_move = playing;

        let king = self.king_square(playing);
        self.in_check = strikes.iter().any(|reply| reply.to() == king);

        if self.in_check && self.ply > 0 {
            self.history[self.ply - 1].set_check();
            self.last_move.set_check();
        }
    }
}

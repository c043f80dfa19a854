//! The recursive search: negamax alpha-beta plus the capture-only
//! quiescence tail.

use crate::board::{Board, Color, Move, Piece};

use super::{SearchEngine, MAX_SEARCH_PLY};

/// Futility margin at depth 1: a knight's worth of slack.
const FUTILITY_MARGIN: i32 = 300;

/// Null-move depth reduction, and the minimum depth to attempt one.
const NULL_MOVE_REDUCTION: i32 = 2;

impl SearchEngine {
    /// Negamax with alpha-beta bounds. `depth` is the remaining nominal
    /// depth; the recursion ply tracks actual distance from the root.
    pub(crate) fn search(
        &mut self,
        board: &mut Board,
        mut depth: i32,
        mut alpha: i32,
        beta: i32,
        allow_null_move: bool,
    ) -> i32 {
        self.check_deadline();
        self.bump_node_count();

        board.update_in_check();

        if board.in_check() {
            // Check extension: never drop to quiescence while in check.
            depth += 1;
        } else if depth == 1 && !board.last_move().is_capture() {
            // Futility: a quiet position that cannot reach alpha even with
            // a knight of slack goes straight to quiescence.
            let estimate = self.evaluator.evaluate(board, self.search_ply);
            if estimate + FUTILITY_MARGIN < alpha {
                return self.quiescent_search(board, alpha, beta);
            }
        }

        if depth <= 0 {
            return self.quiescent_search(board, alpha, beta);
        }

        board.update_threefold_repetition();
        board.update_fifty_move_count();
        if board.repetitions >= 2 || board.flags.fifty_move_rule {
            return 0;
        }

        let frame = self.frame_index();
        board.generate_legal_moves(self.frame_moves_mut(frame), false);

        if self.search_ply >= MAX_SEARCH_PLY - 1 || board.game_state().is_some() {
            return self.evaluator.evaluate(board, self.search_ply);
        }

        // Null move: hand the opponent a free move at reduced depth with a
        // null window. Fail-high means the real position is good enough to
        // prune. Skipped in check, at the root, at low depth, and without
        // major material (zugzwang insurance is the caller's problem).
        if allow_null_move
            && !board.in_check()
            && self.search_ply != 0
            && depth >= NULL_MOVE_REDUCTION
            && has_major_piece(board, board.side_to_move())
        {
            board.make_null_move();
            self.search_ply += NULL_MOVE_REDUCTION as usize;

            let score = -self.search(board, depth - NULL_MOVE_REDUCTION, -beta, -beta + 1, false);

            board.unmake_null_move();
            self.search_ply -= NULL_MOVE_REDUCTION as usize;

            if self.interrupted {
                return 0;
            }
            if score >= beta {
                return beta;
            }
        }

        let starting_alpha = alpha;
        let mut best_move = Move::null();

        let principal = self.pv_probe(board.hash());
        self.score_moves(frame);
        self.boost_principal_move(frame, &principal);

        let move_count = self.frame_len(frame);
        for index in 0..move_count {
            self.select_next_move(frame, index);
            let (mv, move_score) = self.picked_move(frame, index);

            board.make_move(&mv);
            self.search_ply += 1;

            // Late move reduction: later, low-scoring quiet moves search
            // shallower; scored moves, shallow depths and endgames reduce
            // by at most one ply.
            let reduction = if depth >= 2 && index > 0 {
                if move_score >= 900 {
                    0
                } else if move_score != 0 || depth == 2 || self.in_end_game {
                    1
                } else {
                    2
                }
            } else {
                0
            };

            let score = -self.search(board, depth - 1 - reduction, -beta, -alpha, true);

            board.unmake_move(false);
            self.search_ply -= 1;

            if self.interrupted {
                return 0;
            }

            if score > alpha {
                if score >= beta {
                    if !mv.is_capture() {
                        self.store_killer(frame, mv);
                    }
                    return beta;
                }

                alpha = score;
                best_move = mv;

                if !mv.is_capture() {
                    self.credit_history(&mv, depth);
                }
            }
        }

        if alpha != starting_alpha {
            self.pv_store(best_move, board.hash());
        }

        alpha
    }

    /// Capture-only search past the horizon, with a stand-pat bound. Being
    /// in check re-enters the full search so evasions are not skipped.
    pub(crate) fn quiescent_search(&mut self, board: &mut Board, mut alpha: i32, beta: i32) -> i32 {
        self.check_deadline();
        self.bump_node_count();

        board.update_in_check();
        if board.in_check() {
            return self.search(board, 0, alpha, beta, true);
        }

        let frame = self.frame_index();

        if self.search_ply >= MAX_SEARCH_PLY - 1 {
            board.generate_legal_moves(self.frame_moves_mut(frame), false);
            return self.evaluator.evaluate(board, self.search_ply);
        }

        let stand_pat = self.evaluator.evaluate(board, self.search_ply);
        if stand_pat >= beta {
            return beta;
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }

        board.generate_legal_moves(self.frame_moves_mut(frame), true);
        if self.frame_len(frame) == 0 {
            return alpha;
        }

        let starting_alpha = alpha;
        let mut best_move = Move::null();

        let principal = self.pv_probe(board.hash());
        self.score_moves(frame);
        self.boost_principal_move(frame, &principal);

        let move_count = self.frame_len(frame);
        for index in 0..move_count {
            self.select_next_move(frame, index);
            let (mv, _) = self.picked_move(frame, index);

            board.make_move(&mv);
            self.search_ply += 1;

            let score = -self.quiescent_search(board, -beta, -alpha);

            board.unmake_move(false);
            self.search_ply -= 1;

            if self.interrupted {
                return 0;
            }

            if score > alpha {
                if score >= beta {
                    return beta;
                }
                alpha = score;
                best_move = mv;
            }
        }

        if alpha != starting_alpha {
            self.pv_store(best_move, board.hash());
        }

        alpha
    }
}

/// Rook or queen still on the board for `color`; gates null-move pruning.
fn has_major_piece(board: &Board, color: Color) -> bool {
    board.piece_count(color, Piece::Queen) > 0 || board.piece_count(color, Piece::Rook) > 0
}

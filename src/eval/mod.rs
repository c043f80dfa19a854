//! Static position evaluation.
//!
//! Scores are centipawns from the side to move's perspective, matching the
//! search's negamax sign convention. Every call adds a small bounded random
//! jitter, so equal positions do not always tie; the jitter RNG is seeded
//! by the caller for reproducible play.

mod pst;


use rand::prelude::*;

use crate::board::{Board, Color, Move, Piece, Square};
use crate::board::MAX_GAME_PLIES;

/// Sentinel evaluation for a lost position; mate scores count up from here
/// by search ply so nearer mates score stronger.
pub const LOWEST_EVALUATION: i32 = -30_000;
pub const HIGHEST_EVALUATION: i32 = 30_000;

const PASSED_PAWN_BONUSES: [i32; 8] = [0, 10, 15, 25, 40, 65, 100, 100];
const PASSED_PAWN_END_GAME_BONUSES: [i32; 8] = [0, 20, 30, 45, 65, 90, 130, 130];
const PASSED_PAWN_BONUS: i32 = 35;
const PROTECTED_PASSED_PAWN_BONUS: i32 = 40;
const ISOLATED_PAWN_PENALTY: i32 = -35;
const DOUBLED_PAWN_PENALTY: i32 = -10;
const ROOK_ON_OPEN_FILE_BONUS: i32 = 10;
const ROOK_ON_SEMI_OPEN_FILE_BONUS: i32 = 5;
const QUEEN_ON_OPEN_FILE_BONUS: i32 = 5;
const QUEEN_ON_SEMI_OPEN_FILE_BONUS: i32 = 3;
const CASTLING_BONUS: i32 = 250;
const CASTLING_AS_AN_OPTION_BONUS: i32 = 50;
const BISHOP_PAIR_BONUS: i32 = 50;
const KING_IN_CORNER_BONUS: i32 = 25;
const WINNING_LIMIT: i32 = 50;
const LOSING_LIMIT: i32 = -50;
const KINGS_TOGETHER_MAJOR_PIECES_BONUS: i32 = 45;
const KINGS_TOGETHER_MINOR_PIECES_BONUS: i32 = 3;
const KINGS_TOGETHER_PAWNS_BONUS: i32 = 2;
const TRADING_WHILE_WINNING_BONUS: i32 = 50;
const OPPONENT_KING_MOVE_BONUS: i32 = 40;
const PAWN_BREAK_BONUS: i32 = 25;
const PAWN_MOVE_BONUS: i32 = 10;
const FORWARD_MOVE_BONUS: i32 = 15;
const RANDOM_FACTOR: i32 = 3;

/// Static evaluator. Owns only its jitter RNG; all position data comes
/// from the board on each call.
pub struct Evaluator {
    rng: StdRng,
}

impl Evaluator {
    #[must_use]
    pub fn new() -> Self {
        Evaluator {
            rng: StdRng::from_entropy(),
        }
    }

    /// Evaluator with a fixed jitter seed, for reproducible games.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Evaluator {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Score the position for the side to move.
    ///
    /// `search_ply` offsets mate scores so that nearer mates dominate.
    pub fn evaluate(&mut self, board: &Board, search_ply: usize) -> i32 {
        if board.flags.checkmated.is_some() {
            return LOWEST_EVALUATION + search_ply as i32;
        }
        if board.flags.stalemate
            || board.flags.insufficient_material
            || board.flags.fifty_move_rule
            || board.flags.threefold_repetition
            || board.repetitions >= 2
            || board.ply() >= MAX_GAME_PLIES - 2
        {
            return 0;
        }

        let end_game = is_end_game(board);
        let mut evaluation = 0i32;

        for idx in 0..64 {
            let square = Square::from_index(idx);
            let Some((color, piece)) = board.piece_at(square) else {
                continue;
            };
            let sign = color.sign();
            let table = if piece == Piece::King && end_game {
                pst::KING_END_GAME
            } else {
                piece.index()
            };

            evaluation += sign * piece.value();
            evaluation += sign * pst::value(table, color, square);

            match piece {
                Piece::Pawn => {
                    evaluation += sign * pawn_structure_term(board, color, square, end_game);
                }
                Piece::Rook | Piece::Queen => {
                    evaluation += sign * file_control_term(board, piece, square);
                }
                _ => {}
            }
        }

        if board.piece_count(Color::White, Piece::Bishop) >= 2 {
            evaluation += BISHOP_PAIR_BONUS;
        }
        if board.piece_count(Color::Black, Piece::Bishop) >= 2 {
            evaluation -= BISHOP_PAIR_BONUS;
        }

        if end_game {
            // Drive the losing king toward a corner.
            let stm = board.side_to_move();
            if stm == Color::White || evaluation > 0 {
                evaluation +=
                    KING_IN_CORNER_BONUS * corner_distance(board.king_square(Color::Black));
            }
            if stm == Color::Black || evaluation < 0 {
                evaluation -=
                    KING_IN_CORNER_BONUS * corner_distance(board.king_square(Color::White));
            }
        } else {
            for color in Color::BOTH {
                let sign = color.sign();
                if board.has_castled(color) {
                    evaluation += sign * CASTLING_BONUS;
                } else {
                    if board.has_castling_right(color, true) {
                        evaluation += sign * CASTLING_AS_AN_OPTION_BONUS;
                    }
                    if board.has_castling_right(color, false) {
                        evaluation += sign * CASTLING_AS_AN_OPTION_BONUS;
                    }
                }
            }
        }

        // Everything below is from the mover's perspective.
        if board.side_to_move() == Color::Black {
            evaluation = -evaluation;
        }

        let last = board.last_move();

        if end_game {
            if evaluation >= WINNING_LIMIT || evaluation <= LOSING_LIMIT {
                evaluation -= eval_sign(evaluation)
                    * kings_together_weight(board)
                    * king_distance(board);
            }

            if evaluation >= WINNING_LIMIT
                && last.is_capture()
                && (board.ply() < 2 || board.history[board.ply() - 2].is_capture())
            {
                evaluation += TRADING_WHILE_WINNING_BONUS;
            }
        } else {
            let last_piece = last.moved().map(|(_, p)| p);
            if last_piece == Some(Piece::King) {
                evaluation += OPPONENT_KING_MOVE_BONUS;
            } else if last_piece == Some(Piece::Pawn) && castled_imbalance_favors_mover(board) {
                evaluation += if last.is_capture() {
                    PAWN_BREAK_BONUS
                } else {
                    PAWN_MOVE_BONUS
                };
            }

            if !last.is_null() && opponent_advanced(board, last) {
                evaluation -= FORWARD_MOVE_BONUS;
            }
        }

        evaluation += (self.rng.gen_range(0..RANDOM_FACTOR) << 1) - RANDOM_FACTOR;

        evaluation
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Evaluator::new()
    }
}

/// Endgame classifier: queens without rooks, or low rook and minor counts.
/// Gates the king tables and the search time budget.
#[must_use]
pub fn is_end_game(board: &Board) -> bool {
    let count = |c: Color, p: Piece| board.piece_count(c, p) as i32;

    let wq = count(Color::White, Piece::Queen);
    let bq = count(Color::Black, Piece::Queen);
    let wr = count(Color::White, Piece::Rook);
    let br = count(Color::Black, Piece::Rook);
    let w_minors = count(Color::White, Piece::Knight) + count(Color::White, Piece::Bishop);
    let b_minors = count(Color::Black, Piece::Knight) + count(Color::Black, Piece::Bishop);

    let queens_no_rooks = (bq > 0 || wq > 0) && br == 0 && wr == 0;
    let rooks_no_queens = (br <= 1 || wr <= 1) && bq == 0 && wq == 0;

    ((queens_no_rooks || rooks_no_queens) && b_minors <= 1 && w_minors <= 1)
        || (bq + wq <= 1 && br + wr <= 1)
        || ((br <= 2 || wr <= 2) && bq == 0 && wq == 0 && b_minors == 0 && w_minors == 0)
}

fn eval_sign(evaluation: i32) -> i32 {
    if evaluation > 0 {
        1
    } else {
        -1
    }
}

fn corner_distance(square: Square) -> i32 {
    let file = square.file() as i32;
    let rank = square.rank() as i32;
    let file_term = if file < 4 { 3 - file } else { file - 4 };
    let rank_term = if rank < 4 { 3 - rank } else { rank - 4 };
    file_term + rank_term
}

fn king_distance(board: &Board) -> i32 {
    let wk = board.king_square(Color::White);
    let bk = board.king_square(Color::Black);
    (wk.file().abs_diff(bk.file()) + wk.rank().abs_diff(bk.rank())) as i32
}

/// The pull-the-kings-together weight scales with the heaviest material
/// still on the board.
fn kings_together_weight(board: &Board) -> i32 {
    let any = |p: Piece| {
        board.piece_count(Color::White, p) > 0 || board.piece_count(Color::Black, p) > 0
    };
    if any(Piece::Queen) || any(Piece::Rook) {
        KINGS_TOGETHER_MAJOR_PIECES_BONUS
    } else if any(Piece::Knight) || any(Piece::Bishop) {
        KINGS_TOGETHER_MINOR_PIECES_BONUS
    } else {
        KINGS_TOGETHER_PAWNS_BONUS
    }
}

/// True when the mover has castled and the opponent has not.
fn castled_imbalance_favors_mover(board: &Board) -> bool {
    let stm = board.side_to_move();
    board.has_castled(stm) && !board.has_castled(stm.opponent())
}

/// Did the opponent's last move gain ground toward the mover's side?
fn opponent_advanced(board: &Board, last: Move) -> bool {
    match board.side_to_move() {
        // The opponent was White, advancing up the ranks.
        Color::Black => last.from().rank() < last.to().rank(),
        Color::White => last.from().rank() > last.to().rank(),
    }
}

fn pawn_structure_term(board: &Board, color: Color, square: Square, end_game: bool) -> i32 {
    let file = square.file();
    let rank = square.rank();
    let own_pawn = Some((color, Piece::Pawn));
    let enemy_pawn = Some((color.opponent(), Piece::Pawn));

    let (ahead_from, ahead_to) = match color {
        Color::White => (rank + 1, 7),
        Color::Black => (1, rank),
    };
    let mut passed = true;
    'outer: for r in ahead_from..ahead_to {
        for f in file.saturating_sub(1)..=(file + 1).min(7) {
            if board.piece_at(Square(r, f)) == enemy_pawn {
                passed = false;
                break 'outer;
            }
        }
    }

    let mut isolated = true;
    for adjacent in [file.wrapping_sub(1), file + 1] {
        if adjacent > 7 {
            continue;
        }
        for r in 1..7 {
            if board.piece_at(Square(r, adjacent)) == own_pawn {
                isolated = false;
            }
        }
    }

    let mut doubled = false;
    for r in 1..7 {
        if r != rank && board.piece_at(Square(r, file)) == own_pawn {
            doubled = true;
        }
    }

    let mut term = 0;

    if passed {
        let advancement = match color {
            Color::White => rank,
            Color::Black => 7 - rank,
        };
        let table = if end_game {
            &PASSED_PAWN_END_GAME_BONUSES
        } else {
            &PASSED_PAWN_BONUSES
        };
        term += PASSED_PAWN_BONUS + table[advancement];

        if rook_supports_passed_pawn(board, color, square) {
            term += PROTECTED_PASSED_PAWN_BONUS;
        }
    }
    if isolated {
        term += ISOLATED_PAWN_PENALTY;
    }
    if doubled {
        term += DOUBLED_PAWN_PENALTY;
    }

    term
}

/// A friendly rook behind the passed pawn with nothing between them.
fn rook_supports_passed_pawn(board: &Board, color: Color, square: Square) -> bool {
    // Walk from the owner's back rank toward the pawn.
    match color {
        Color::White => scan_for_rook_support(board, color, square.file(), 0..square.rank()),
        Color::Black => {
            scan_for_rook_support(board, color, square.file(), (square.rank() + 1..8).rev())
        }
    }
}

fn scan_for_rook_support(
    board: &Board,
    color: Color,
    file: usize,
    ranks: impl Iterator<Item = usize>,
) -> bool {
    let mut supported = false;
    for r in ranks {
        match board.piece_at(Square(r, file)) {
            Some((c, Piece::Rook)) if c == color => supported = true,
            Some(_) if supported => return false,
            _ => {}
        }
    }
    supported
}

fn file_control_term(board: &Board, piece: Piece, square: Square) -> i32 {
    let mut open = true;
    let mut semi_open = true;
    let mut pawn_color_seen: Option<Color> = None;

    for r in 1..7 {
        if let Some((c, Piece::Pawn)) = board.piece_at(Square(r, square.file())) {
            match pawn_color_seen {
                None => {
                    pawn_color_seen = Some(c);
                    open = false;
                }
                Some(seen) if seen != c => {
                    semi_open = false;
                    break;
                }
                _ => {}
            }
        }
    }

    if piece == Piece::Rook {
        if open {
            ROOK_ON_OPEN_FILE_BONUS
        } else if semi_open {
            ROOK_ON_SEMI_OPEN_FILE_BONUS
        } else {
            0
        }
    } else if open {
        QUEEN_ON_OPEN_FILE_BONUS
    } else if semi_open {
        QUEEN_ON_SEMI_OPEN_FILE_BONUS
    } else {
        0
    }
}

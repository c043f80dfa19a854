//! Move selection: iterative-deepening negamax alpha-beta over a board and
//! evaluator.
//!
//! Features:
//! - Iterative deepening with aspiration windows
//! - Negamax alpha-beta with null-move pruning and late move reduction
//! - Quiescence search with stand-pat
//! - Move ordering (PV move, MVV-LVA captures, killers, history)
//! - Principal-variation hash table and opening-book probe
//! - Cooperative deadline polling; a cut-off iteration is discarded and
//!   the previous depth's move kept

mod book;
mod negamax;
mod pv;

#[cfg(test)]
mod tests;

pub use book::OpeningBook;

use std::time::{Duration, Instant};

use rand::prelude::*;

use crate::board::{linear_index, Board, Move, MoveList, MAX_MOVES};
use crate::eval::{is_end_game, Evaluator, HIGHEST_EVALUATION, LOWEST_EVALUATION};

use pv::PvTable;

/// Recursion ceiling and scratch-arena size. Check extensions and the
/// quiescence tail all live under this bound.
pub(crate) const MAX_SEARCH_PLY: usize = 24;

/// Plies from the game start within which the opening book is probed.
const OPENING_PLY_WINDOW: usize = 9;

const ASPIRATION_WINDOW_WIDTH: i32 = 50;

/// Time budget and depth limits for [`SearchEngine::think`].
#[derive(Clone, Debug)]
pub struct SearchOptions {
    /// Wall-clock budget per move.
    pub think_time: Duration,
    /// Budget per move once the endgame classifier triggers.
    pub end_game_think_time: Duration,
    /// Iterative-deepening depth limit.
    pub max_depth: u8,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            think_time: Duration::from_secs(5),
            end_game_think_time: Duration::from_secs(10),
            max_depth: 6,
        }
    }
}

/// Per-recursion-depth scratch: the generated moves and their ordering
/// scores. One frame per search ply, reused across searches.
struct SearchFrame {
    moves: MoveList,
    scores: [i32; MAX_MOVES],
}

impl SearchFrame {
    fn new() -> Self {
        SearchFrame {
            moves: MoveList::new(),
            scores: [0; MAX_MOVES],
        }
    }
}

/// Adversarial move chooser.
///
/// Owns all search scratch state (frame arena, killer and history tables,
/// PV table) so nothing is allocated during recursion. Single-threaded:
/// one engine drives one board at a time.
pub struct SearchEngine {
    pub(crate) options: SearchOptions,
    pub(crate) evaluator: Evaluator,
    book: OpeningBook,
    rng: StdRng,

    frames: Vec<SearchFrame>,
    killers: [[Move; MAX_SEARCH_PLY]; 2],
    history: [[i32; 64]; 12],
    pv_table: PvTable,
    pv_line: [Move; MAX_SEARCH_PLY],

    pub(crate) in_end_game: bool,
    deadline: Instant,
    starting_depth: u8,
    pub(crate) search_ply: usize,
    nodes: u64,
    pub(crate) interrupted: bool,
}

impl SearchEngine {
    /// Engine with default options, the built-in opening book and an
    /// entropy-seeded RNG.
    #[must_use]
    pub fn new() -> Self {
        Self::build(SearchOptions::default(), OpeningBook::standard(), None)
    }

    /// Engine whose jitter and tie-break randomness is fully determined by
    /// `seed`, for reproducible games.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::build(
            SearchOptions::default(),
            OpeningBook::standard(),
            Some(seed),
        )
    }

    fn build(options: SearchOptions, book: OpeningBook, seed: Option<u64>) -> Self {
        let (rng, evaluator) = match seed {
            Some(seed) => (
                StdRng::seed_from_u64(seed),
                Evaluator::with_seed(seed.wrapping_add(1)),
            ),
            None => (StdRng::from_entropy(), Evaluator::new()),
        };

        SearchEngine {
            options,
            evaluator,
            book,
            rng,
            frames: (0..MAX_SEARCH_PLY).map(|_| SearchFrame::new()).collect(),
            killers: [[Move::null(); MAX_SEARCH_PLY]; 2],
            history: [[0; 64]; 12],
            pv_table: PvTable::new(),
            pv_line: [Move::null(); MAX_SEARCH_PLY],
            in_end_game: false,
            deadline: Instant::now(),
            starting_depth: 0,
            search_ply: 0,
            nodes: 0,
            interrupted: false,
        }
    }

    pub fn set_options(&mut self, options: SearchOptions) {
        self.options = options;
    }

    #[must_use]
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn set_book(&mut self, book: OpeningBook) {
        self.book = book;
    }

    /// Pick a move for the side to move. Returns `None` only when no legal
    /// move exists.
    ///
    /// With exactly one legal move it is returned without searching. Early
    /// in the game the opening book is probed. Otherwise iterative
    /// deepening runs until the deadline, the depth limit, or a forced
    /// mate; an interrupted iteration is discarded in favor of the last
    /// completed one.
    pub fn think(&mut self, board: &mut Board) -> Option<Move> {
        let mut legal = MoveList::new();
        board.generate_legal_moves(&mut legal, false);
        if legal.is_empty() {
            return None;
        }
        if legal.len() == 1 {
            return Some(legal[0]);
        }

        if board.ply() <= OPENING_PLY_WINDOW {
            if let Some(book_move) = self.book.probe(board.hash(), &legal, &mut self.rng) {
                #[cfg(feature = "logging")]
                log::debug!("book move {book_move} at ply {}", board.ply());
                return Some(book_move);
            }
        }

        self.clear_tables();

        self.in_end_game = is_end_game(board);
        let budget = if self.in_end_game {
            self.options.end_game_think_time
        } else {
            self.options.think_time
        };
        self.deadline = Instant::now() + budget;
        self.interrupted = false;
        self.search_ply = 0;

        let mut alpha = LOWEST_EVALUATION;
        let mut beta = HIGHEST_EVALUATION;
        let mut best_move = Move::null();

        self.starting_depth = 1;
        while self.starting_depth <= self.options.max_depth {
            self.nodes = 0;

            let score = self.search(board, i32::from(self.starting_depth), alpha, beta, true);

            if self.interrupted {
                break;
            }

            if score < alpha || score > beta {
                // Aspiration window failed: retry this depth at full width.
                alpha = LOWEST_EVALUATION;
                beta = HIGHEST_EVALUATION;
                continue;
            }

            alpha = score - ASPIRATION_WINDOW_WIDTH;
            beta = score + ASPIRATION_WINDOW_WIDTH;

            let pv_len = self.extract_principal_variation(board, self.starting_depth as usize);
            if pv_len > 0 {
                best_move = self.pv_line[0];
            }

            #[cfg(feature = "logging")]
            log::debug!(
                "depth {} score {score} nodes {} pv {}",
                self.starting_depth,
                self.nodes,
                self.pv_line[..pv_len]
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ")
            );

            if score >= HIGHEST_EVALUATION - MAX_SEARCH_PLY as i32 {
                // Forced mate: no deeper iteration can improve on it.
                break;
            }

            self.starting_depth += 1;
        }

        if best_move.is_null() {
            best_move = legal[self.rng.gen_range(0..legal.len())];
        }
        Some(best_move)
    }

    /// Walk the PV table from the current position, re-validating each move
    /// against the legal list. Falls back to a random legal move when the
    /// root probe misses. Returns the line length.
    fn extract_principal_variation(&mut self, board: &mut Board, depth: usize) -> usize {
        let depth = depth.min(MAX_SEARCH_PLY);
        let mut mv = self.pv_table.probe(board.hash());
        let mut count = 0;

        self.pv_line = [Move::null(); MAX_SEARCH_PLY];

        while count < depth {
            if Self::move_exists(board, &mv) {
                board.make_move(&mv);
                self.pv_line[count] = mv;
                count += 1;
            } else if count == 0 {
                let mut legal = MoveList::new();
                board.generate_legal_moves(&mut legal, false);
                if !legal.is_empty() {
                    let fallback = legal[self.rng.gen_range(0..legal.len())];
                    board.make_move(&fallback);
                    self.pv_line[count] = fallback;
                    count += 1;
                }
                break;
            } else {
                break;
            }

            mv = self.pv_table.probe(board.hash());
        }

        for _ in 0..count {
            board.unmake_move(false);
        }

        count
    }

    fn move_exists(board: &mut Board, mv: &Move) -> bool {
        if mv.is_null() {
            return false;
        }
        let mut legal = MoveList::new();
        board.generate_legal_moves(&mut legal, false);
        legal.iter().any(|m| m == mv)
    }

    fn clear_tables(&mut self) {
        self.pv_table.clear();
        self.history = [[0; 64]; 12];
        self.killers = [[Move::null(); MAX_SEARCH_PLY]; 2];
    }

    /// Cooperative cancellation: polled every 32 visited nodes. Depth 1
    /// always runs to completion so a move is available.
    pub(crate) fn check_deadline(&mut self) {
        if self.nodes & 0x1F != 0 {
            return;
        }
        if self.starting_depth > 1 && Instant::now() > self.deadline {
            self.interrupted = true;
        }
    }

    pub(crate) fn bump_node_count(&mut self) {
        self.nodes += 1;
    }

    pub(crate) fn frame_index(&self) -> usize {
        self.search_ply.min(MAX_SEARCH_PLY - 1)
    }

    pub(crate) fn frame_moves_mut(&mut self, index: usize) -> &mut MoveList {
        &mut self.frames[index].moves
    }

    /// MVV-LVA capture scores, PV bonus aside: victim value dominates, the
    /// attacker's value nudges cheaper attackers first.
    pub(crate) fn score_moves(&mut self, frame_index: usize) {
        const VICTIM_VALUES: [i32; 6] = [100, 200, 300, 400, 500, 600];
        const CAPTURE_BASE: i32 = 2500;
        const KILLER_PRIMARY: i32 = 1000;
        const KILLER_SECONDARY: i32 = 900;

        let killers = self.killers;
        let frame = &mut self.frames[frame_index];

        for i in 0..frame.moves.len() {
            let m = frame.moves[i];
            frame.scores[i] = if m.is_capture() {
                let victim = m
                    .captured()
                    .map_or(0, |(_, piece)| VICTIM_VALUES[piece.index()]);
                let attacker = m
                    .moved()
                    .map_or(0, |(_, piece)| VICTIM_VALUES[piece.index()]);
                victim + 6 - attacker / 100 + CAPTURE_BASE
            } else if m == killers[0][frame_index] {
                KILLER_PRIMARY
            } else if m == killers[1][frame_index] {
                KILLER_SECONDARY
            } else {
                let (color, piece) = m.moved().expect("generated move has a mover");
                self.history[linear_index(color, piece)][m.to().index()]
            };
        }
    }

    /// Add the PV bonus to any move matching the cached principal move.
    pub(crate) fn boost_principal_move(&mut self, frame_index: usize, principal: &Move) {
        const PV_BONUS: i32 = 5000;

        if principal.is_null() {
            return;
        }
        let frame = &mut self.frames[frame_index];
        for i in 0..frame.moves.len() {
            if frame.moves[i] == *principal {
                frame.scores[i] += PV_BONUS;
            }
        }
    }

    /// Incremental selection sort step: swap the best remaining move into
    /// position `index`.
    pub(crate) fn select_next_move(&mut self, frame_index: usize, index: usize) {
        let frame = &mut self.frames[frame_index];
        let count = frame.moves.len();
        if index >= count {
            return;
        }

        let mut best = index;
        for i in index + 1..count {
            if frame.scores[i] > frame.scores[best] {
                best = i;
            }
        }

        if best != index {
            frame.moves.as_mut_slice().swap(index, best);
            frame.scores.swap(index, best);
        }
    }

    pub(crate) fn picked_move(&self, frame_index: usize, index: usize) -> (Move, i32) {
        let frame = &self.frames[frame_index];
        (frame.moves[index], frame.scores[index])
    }

    pub(crate) fn frame_len(&self, frame_index: usize) -> usize {
        self.frames[frame_index].moves.len()
    }

    /// Record a quiet move that caused a beta cutoff.
    pub(crate) fn store_killer(&mut self, frame_index: usize, mv: Move) {
        self.killers[1][frame_index] = self.killers[0][frame_index];
        self.killers[0][frame_index] = mv;
    }

    /// Credit a quiet move that raised alpha.
    pub(crate) fn credit_history(&mut self, mv: &Move, depth: i32) {
        let (color, piece) = mv.moved().expect("searched move has a mover");
        self.history[linear_index(color, piece)][mv.to().index()] += depth;
    }

    pub(crate) fn pv_probe(&self, hash: u64) -> Move {
        self.pv_table.probe(hash)
    }

    pub(crate) fn pv_store(&mut self, mv: Move, hash: u64) {
        self.pv_table.store(mv, hash, self.search_ply);
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        SearchEngine::new()
    }
}

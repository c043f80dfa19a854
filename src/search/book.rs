//! Opening book: a table of (position hash, move) entries probed during the
//! first few plies.
//!
//! Entries are built by replaying move sequences from the start position,
//! so the recorded hashes always match the crate's own Zobrist keys. Lines
//! sharing a prefix produce duplicate entries for the shared positions,
//! which weights the random choice toward the more common continuations.

use rand::prelude::*;

use crate::board::{Board, Move, MoveList, Piece, Square};

/// Mainline openings the built-in book knows, in coordinate notation.
const STANDARD_LINES: &[&str] = &[
    // Italian complex
    "e2e4 e7e5 g1f3 b8c6 f1c4 f8c5 c2c3 g8f6 d2d3 d7d6",
    "e2e4 e7e5 g1f3 b8c6 f1c4 g8f6 d2d3 f8c5",
    // Ruy Lopez: closed and Berlin
    "e2e4 e7e5 g1f3 b8c6 f1b5 a7a6 b5a4 g8f6 e1g1 f8e7 f1e1 b7b5 a4b3 d7d6",
    "e2e4 e7e5 g1f3 b8c6 f1b5 g8f6 e1g1 f6e4 d2d4 e4d6 b5c6 d7c6",
    // Sicilian: Najdorf, Dragon, Sveshnikov
    "e2e4 c7c5 g1f3 d7d6 d2d4 c5d4 f3d4 g8f6 b1c3 a7a6",
    "e2e4 c7c5 g1f3 d7d6 d2d4 c5d4 f3d4 g8f6 b1c3 g7g6",
    "e2e4 c7c5 g1f3 b8c6 d2d4 c5d4 f3d4 g8f6 b1c3 e7e5",
    // French, Caro-Kann, Scandinavian, Pirc
    "e2e4 e7e6 d2d4 d7d5 b1c3 g8f6 c1g5 f8e7",
    "e2e4 c7c6 d2d4 d7d5 b1c3 d5e4 c3e4 c8f5",
    "e2e4 d7d5 e4d5 d8d5 b1c3 d5a5 d2d4 g8f6",
    "e2e4 d7d6 d2d4 g8f6 b1c3 g7g6 f2f4 f8g7",
    // Queen's Gambit: declined, accepted, Slav
    "d2d4 d7d5 c2c4 e7e6 b1c3 g8f6 c1g5 f8e7 e2e3 e8g8",
    "d2d4 d7d5 c2c4 d5c4 g1f3 g8f6 e2e3 e7e6 f1c4 c7c5",
    "d2d4 d7d5 c2c4 c7c6 g1f3 g8f6 b1c3 d5c4 a2a4 c8f5",
    // Indian defenses
    "d2d4 g8f6 c2c4 g7g6 b1c3 f8g7 e2e4 d7d6 g1f3 e8g8",
    "d2d4 g8f6 c2c4 e7e6 b1c3 f8b4 e2e3 e8g8",
    "d2d4 g8f6 c2c4 g7g6 b1c3 d7d5 c4d5 f6d5 e2e4 d5c3 b2c3 f8g7",
    "d2d4 g8f6 c2c4 e7e6 g2g3 d7d5 f1g2 f8e7 g1f3 e8g8",
    // London, English, Réti
    "d2d4 d7d5 g1f3 g8f6 c1f4 c7c5 e2e3 b8c6",
    "c2c4 e7e5 b1c3 g8f6 g1f3 b8c6 g2g3 d7d5",
    "c2c4 c7c5 g1f3 g8f6 b1c3 d7d5 c4d5 f6d5",
    "g1f3 d7d5 c2c4 c7c6 b2b3 g8f6 g2g3 c8f5",
];

struct BookEntry {
    hash: u64,
    from: Square,
    to: Square,
    promotion: Option<Piece>,
}

/// A hash-keyed opening table.
pub struct OpeningBook {
    entries: Vec<BookEntry>,
}

impl OpeningBook {
    /// The built-in mainline book.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_lines(STANDARD_LINES.iter().copied())
    }

    /// A book with no entries; probes always miss.
    #[must_use]
    pub fn empty() -> Self {
        OpeningBook {
            entries: Vec::new(),
        }
    }

    /// Build a book from move sequences in coordinate notation
    /// ("e2e4 e7e5 ..."), each starting from the standard position.
    /// A line stops contributing at its first unparsable or illegal move.
    pub fn from_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut entries = Vec::new();

        for line in lines {
            let mut board = Board::new();
            let mut legal = MoveList::new();

            for token in line.split_whitespace() {
                let Some((from, to, promotion)) = parse_coordinate(token) else {
                    break;
                };

                board.generate_legal_moves(&mut legal, false);
                let Some(mv) = legal
                    .iter()
                    .find(|m| m.from() == from && m.to() == to && m.promotion() == promotion)
                    .copied()
                else {
                    break;
                };

                entries.push(BookEntry {
                    hash: board.hash(),
                    from,
                    to,
                    promotion,
                });
                board.make_move(&mv);
            }
        }

        OpeningBook { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All legal moves consistent with an entry for `hash`, choosing
    /// uniformly at random among them (duplicates weight the choice).
    pub(crate) fn probe(&self, hash: u64, legal: &MoveList, rng: &mut StdRng) -> Option<Move> {
        let mut candidates: Vec<Move> = Vec::new();

        for entry in &self.entries {
            if entry.hash != hash {
                continue;
            }
            for m in legal.iter() {
                if m.from() != entry.from || m.to() != entry.to {
                    continue;
                }
                if entry.promotion.is_some() && m.promotion() != entry.promotion {
                    continue;
                }
                candidates.push(*m);
            }
        }

        if candidates.is_empty() {
            None
        } else {
            Some(candidates[rng.gen_range(0..candidates.len())])
        }
    }
}

fn parse_coordinate(token: &str) -> Option<(Square, Square, Option<Piece>)> {
    if token.len() < 4 {
        return None;
    }
    let from: Square = token.get(0..2)?.parse().ok()?;
    let to: Square = token.get(2..4)?.parse().ok()?;
    let promotion = match token.get(4..5) {
        Some(c) => Some(Piece::from_char(c.chars().next()?)?),
        None => None,
    };
    Some((from, to, promotion))
}

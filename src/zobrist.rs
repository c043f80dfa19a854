//! Zobrist hashing keys for chess positions.
//!
//! A position's hash combines piece placement, the side to move, the
//! castling-rights combination and (only when actually capturable) the en
//! passant target square. Hash equality is the repetition rule's notion of
//! "same position".

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{Color, Piece};

pub(crate) struct ZobristKeys {
    /// piece_keys[piece][color][square]
    pub(crate) piece_keys: [[[u64; 64]; 2]; 6],
    /// XORed in when White is to move
    pub(crate) white_to_move_key: u64,
    /// One key per 4-bit castling-rights combination
    pub(crate) castling_keys: [u64; 16],
    /// en_passant_keys[square], applied only when a capture is possible
    pub(crate) en_passant_keys: [u64; 64],
}

impl ZobristKeys {
    fn new() -> Self {
        // Fixed seed so hashes are stable across runs.
        let mut rng = StdRng::seed_from_u64(0x5EED_CAB1_E5_u64);
        let mut piece_keys = [[[0; 64]; 2]; 6];
        let mut castling_keys = [0; 16];
        let mut en_passant_keys = [0; 64];

        for piece in &mut piece_keys {
            for color in piece.iter_mut() {
                for key in color.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let white_to_move_key = rng.gen();

        for key in &mut castling_keys {
            *key = rng.gen();
        }

        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            white_to_move_key,
            castling_keys,
            en_passant_keys,
        }
    }
}

pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);

#[inline]
pub(crate) fn piece_key(color: Color, piece: Piece, square: usize) -> u64 {
    ZOBRIST.piece_keys[piece.index()][color.index()][square]
}

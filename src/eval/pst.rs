//! Piece-square tables.
//!
//! Each table is 32 entries: eight rows of the four queenside files, with
//! kingside files mirrored onto them. Row 0 is the far side of the board
//! from the piece owner's point of view.

use crate::board::{Color, Square};

/// Index of the endgame king table; the first six rows follow
/// `Piece::index()` order.
pub(crate) const KING_END_GAME: usize = 6;

#[rustfmt::skip]
pub(crate) const PIECE_SQUARE_TABLES: [[i32; 32]; 7] = [
    [ // Pawns
         0,  0,  0,  0,
        50, 50, 50, 50,
        10, 10, 20, 30,
         5,  5, 10, 25,
         0,  0,  0, 40,
         5, -5,-10,  0,
         5, 10, 10,-40,
         0,  0,  0,  0,
    ],
    [ // Knights
       -50,-40,-30,-30,
       -40,-20,  0,  0,
       -30,  0, 10, 15,
       -30,  5, 15, 20,
       -30,  0, 15, 20,
       -30,  5, 10, 15,
       -40,-20,  0,  5,
       -50,-40,-30,-30,
    ],
    [ // Bishops
       -20,-10,-10,-10,
       -10,  0,  0,  0,
       -10,  0,  5, 10,
       -10,  5,  5, 10,
       -10,  0, 10, 10,
       -10, 10, 10, 10,
       -10,  5,  0,  0,
       -20,-10,-10,-10,
    ],
    [ // Rooks
         0,  0,  0,  0,
         5, 10, 10, 10,
        -5,  0,  0,  0,
        -5,  0,  0,  0,
        -5,  0,  0,  0,
        -5,  0,  0,  0,
        -5,  0,  0,  0,
         0,  0,  0,  5,
    ],
    [ // Queens
       -20,-10,-10, -5,
       -10,  0,  0,  0,
       -10,  0,  5,  5,
        -5,  0,  5,  5,
         0,  0,  5,  5,
       -10,  5,  5,  5,
       -10,  0,  5,  0,
       -20,-10,-10, -5,
    ],
    [ // Kings
       -30,-40,-40,-50,
       -30,-40,-40,-50,
       -30,-40,-40,-50,
       -30,-40,-40,-50,
       -20,-40,-40,-50,
       -10,-40,-40,-40,
         0,  0,-40,-40,
         0,  0,  0,  0,
    ],
    [ // Endgame kings
       -50,-40,-30,-20,
       -30,-20,-10,  0,
       -30,-10, 20, 30,
       -30,-10, 30, 40,
       -30,-10, 30, 40,
       -30,-10, 20, 30,
       -30,-30,  0,  0,
       -50,-30,-30,-30,
    ],
];

/// Table value for a piece of `color` on `square`.
#[inline]
pub(crate) fn value(table: usize, color: Color, square: Square) -> i32 {
    let row = match color {
        Color::White => 7 - square.rank(),
        Color::Black => square.rank(),
    };
    let col = if square.file() < 4 {
        square.file()
    } else {
        7 - square.file()
    };
    PIECE_SQUARE_TABLES[table][row * 4 + col]
}

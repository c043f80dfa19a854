//! FEN import and export.

use std::str::FromStr;

use super::error::FenError;
use super::state::FIFTY_MOVE_LIMIT;
use super::{
    castle_bit, Board, Color, Piece, Square, CASTLE_BLACK_K, CASTLE_BLACK_Q, CASTLE_WHITE_K,
    CASTLE_WHITE_Q,
};

impl Board {
    /// Build a board from a FEN string.
    ///
    /// The imported position becomes the game's baseline: castling rights,
    /// half-move clock, in-check state and hash captured here are what
    /// unmaking the first move restores.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        let mut board = Board::blank();

        for (rank_idx, rank_str) in parts[0].split('/').enumerate() {
            if rank_idx >= 8 {
                return Err(FenError::InvalidRank { rank: rank_idx });
            }
            let rank = 7 - rank_idx;
            let mut file = 0;
            for c in rank_str.chars() {
                if let Some(digit) = c.to_digit(10) {
                    file += digit as usize;
                } else {
                    let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                    let color = if c.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    if file >= 8 {
                        return Err(FenError::TooManyFiles {
                            rank: rank_idx,
                            files: file + 1,
                        });
                    }
                    board.place_piece(Some((color, piece)), Square(rank, file));
                    file += 1;
                }
            }
        }

        for color in Color::BOTH {
            let kings = board.piece_count(color, Piece::King);
            if kings != 1 {
                return Err(FenError::BadKingCount {
                    color: color.to_string(),
                    count: kings as usize,
                });
            }
        }

        board.side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        board.castling_rights = 0;
        if parts[2] != "-" {
            for c in parts[2].chars() {
                board.castling_rights |= match c {
                    'K' => CASTLE_WHITE_K,
                    'Q' => CASTLE_WHITE_Q,
                    'k' => CASTLE_BLACK_K,
                    'q' => CASTLE_BLACK_Q,
                    _ => return Err(FenError::InvalidCastling { char: c }),
                };
            }
        }
        board.initial_castling_rights = board.castling_rights;

        board.en_passant_target = match parts[3] {
            "-" => None,
            s => Some(s.parse().map_err(|_| FenError::InvalidEnPassant {
                found: s.to_string(),
            })?),
        };

        board.fifty_move_count = match parts.get(4) {
            Some(s) => s.parse().map_err(|_| FenError::InvalidCounter {
                found: (*s).to_string(),
            })?,
            None => 0,
        };
        board.initial_fifty_move_count = board.fifty_move_count;
        board.flags.fifty_move_rule = board.fifty_move_count >= FIFTY_MOVE_LIMIT;

        let full_moves: usize = match parts.get(5) {
            Some(s) => s.parse().map_err(|_| FenError::InvalidCounter {
                found: (*s).to_string(),
            })?,
            None => 1,
        };
        board.base_half_moves = full_moves.saturating_sub(1) * 2
            + usize::from(board.side_to_move == Color::Black);

        board.update_in_check();
        board.initial_in_check = board.in_check;
        board.update_insufficient_material();

        board.hash = board.compute_hash();
        board.initial_hash = board.hash;

        Ok(board)
    }

    /// Export the current position as a FEN string.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);

        for rank in (0..8).rev() {
            let mut empty_run = 0;
            for file in 0..8 {
                match self.piece_at(Square(rank, file)) {
                    None => empty_run += 1,
                    Some((color, piece)) => {
                        if empty_run != 0 {
                            fen.push(char::from_digit(empty_run, 10).expect("run of at most 8"));
                            empty_run = 0;
                        }
                        fen.push(piece.to_fen_char(color));
                    }
                }
            }
            if empty_run != 0 {
                fen.push(char::from_digit(empty_run, 10).expect("run of at most 8"));
            }
            if rank != 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(if self.side_to_move == Color::White {
            'w'
        } else {
            'b'
        });

        fen.push(' ');
        if self.castling_rights == 0 {
            fen.push('-');
        } else {
            for (color, kingside, letter) in [
                (Color::White, true, 'K'),
                (Color::White, false, 'Q'),
                (Color::Black, true, 'k'),
                (Color::Black, false, 'q'),
            ] {
                if self.castling_rights & castle_bit(color, kingside) != 0 {
                    fen.push(letter);
                }
            }
        }

        fen.push(' ');
        match self.en_passant_target {
            Some(square) => fen.push_str(&square.to_string()),
            None => fen.push('-'),
        }

        fen.push_str(&format!(
            " {} {}",
            self.fifty_move_count,
            self.full_move_number()
        ));

        fen
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_fen(s)
    }
}

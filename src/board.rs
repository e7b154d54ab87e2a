/*
 * Dama, a Turkish Draughts engine core
 * Copyright (C) 2024 Jasper Shovelton
 *
 * Dama is free software: you can redistribute it and/or modify it under the
 * terms of the GNU General Public License as published by the Free Software
 * Foundation, either version 3 of the License, or (at your option) any later
 * version.
 *
 * Dama is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
 * FOR A PARTICULAR PURPOSE. See the GNU General Public License for more
 * details.
 *
 * You should have received a copy of the GNU General Public License along with
 * Dama. If not, see <https://www.gnu.org/licenses/>.
 */

//! The immutable board snapshot and the operations defined over it:
//! action generation, transitions, status, rotation, and perft.

mod movegen;

use std::fmt;

use crate::action::Action;
use crate::bitboard::{self, RANK_1, RANK_8};
use crate::error::DamaError;
use crate::square::Square;
use crate::status::GameStatus;
use crate::team::Team;

/// White's starting mask: rows 1 and 2 (ranks 2-3).
const START_WHITE: u64 = 0x0000_0000_00FF_FF00;
/// Black's starting mask: rows 5 and 6 (ranks 6-7).
const START_BLACK: u64 = 0x00FF_FF00_0000_0000;

/// An immutable snapshot of a Turkish Draughts position.
///
/// Two boards compare equal iff all four fields agree; hashing combines
/// all four. `Board` contains only plain integers and an enum, so it is
/// `Copy`, `Send`, and `Sync` for free.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    white: u64,
    black: u64,
    kings: u64,
    turn: Team,
}

impl Board {
    /// The standard Turkish Draughts starting position.
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self {
            white: START_WHITE,
            black: START_BLACK,
            kings: 0,
            turn: Team::White,
        }
    }

    /// Builds a board from explicit square lists.
    ///
    /// # Errors
    ///
    /// Returns [`DamaError::InvalidConfiguration`] if `king_squares` is not
    /// a subset of `white_squares ∪ black_squares`, if white and black
    /// overlap, or if a non-king piece sits on its own promotion rank.
    pub fn from_squares(
        turn: Team,
        white_squares: &[Square],
        black_squares: &[Square],
        king_squares: &[Square],
    ) -> Result<Self, DamaError> {
        let white = white_squares.iter().fold(0u64, |acc, sq| acc | sq.to_mask());
        let black = black_squares.iter().fold(0u64, |acc, sq| acc | sq.to_mask());
        let kings = king_squares.iter().fold(0u64, |acc, sq| acc | sq.to_mask());
        if kings & !(white | black) != 0 {
            return Err(DamaError::InvalidConfiguration(
                "a king square must also be a white or black square".to_owned(),
            ));
        }
        Self::from_raw(turn, white, black, kings)
    }

    /// Builds a board from raw bitboards.
    ///
    /// `turn` is `0` for White or `1` for Black, matching
    /// [`bitboards`](Board::bitboards)'s return encoding.
    ///
    /// # Errors
    ///
    /// Returns [`DamaError::InvalidConfiguration`] if `turn` is neither `0`
    /// nor `1`, or if the masks violate a board invariant.
    pub fn from_bitboards(turn: u8, white: u64, black: u64, kings: u64) -> Result<Self, DamaError> {
        let turn = match turn {
            0 => Team::White,
            1 => Team::Black,
            other => {
                return Err(DamaError::InvalidConfiguration(format!(
                    "turn must be 0 (White) or 1 (Black), got {other}"
                )))
            }
        };
        Self::from_raw(turn, white, black, kings)
    }

    fn from_raw(turn: Team, white: u64, black: u64, kings: u64) -> Result<Self, DamaError> {
        if white & black != 0 {
            return Err(DamaError::InvalidConfiguration(
                "white and black masks overlap".to_owned(),
            ));
        }
        if kings & !(white | black) != 0 {
            return Err(DamaError::InvalidConfiguration(
                "a king bit is set on a square held by neither side".to_owned(),
            ));
        }
        if (white & !kings) & RANK_8 != 0 {
            return Err(DamaError::InvalidConfiguration(
                "a non-king white piece sits on White's promotion rank".to_owned(),
            ));
        }
        if (black & !kings) & RANK_1 != 0 {
            return Err(DamaError::InvalidConfiguration(
                "a non-king black piece sits on Black's promotion rank".to_owned(),
            ));
        }
        Ok(Self {
            white,
            black,
            kings,
            turn,
        })
    }

    /// The side to move.
    #[must_use]
    #[inline]
    pub const fn turn(&self) -> Team {
        self.turn
    }

    /// The mask of pieces belonging to `team`.
    #[must_use]
    #[inline]
    pub(crate) const fn side_bitboard(&self, team: Team) -> u64 {
        match team {
            Team::White => self.white,
            Team::Black => self.black,
        }
    }

    /// The mask of White's pieces.
    #[must_use]
    #[inline]
    pub const fn white_bitboard(&self) -> u64 {
        self.white
    }

    /// The mask of Black's pieces.
    #[must_use]
    #[inline]
    pub const fn black_bitboard(&self) -> u64 {
        self.black
    }

    /// The mask of every king, of either side.
    #[must_use]
    #[inline]
    pub const fn kings_bitboard(&self) -> u64 {
        self.kings
    }

    /// The squares White occupies.
    #[must_use]
    pub fn white_pieces(&self) -> Vec<Square> {
        bitboard::bit_iter(self.white).collect()
    }

    /// The squares Black occupies.
    #[must_use]
    pub fn black_pieces(&self) -> Vec<Square> {
        bitboard::bit_iter(self.black).collect()
    }

    /// The squares holding a king, of either side.
    #[must_use]
    pub fn kings(&self) -> Vec<Square> {
        bitboard::bit_iter(self.kings).collect()
    }

    /// `(white, black, kings, turn)`, with `turn` encoded as `0`/`1`.
    #[must_use]
    #[inline]
    pub const fn bitboards(&self) -> (u64, u64, u64, u8) {
        (self.white, self.black, self.kings, self.turn.index())
    }

    /// The same values as [`bitboards`](Board::bitboards), as an array
    /// (the turn bit, widened to `u64`, is the fourth element).
    #[must_use]
    #[inline]
    pub const fn to_array(&self) -> [u64; 4] {
        [self.white, self.black, self.kings, self.turn.index() as u64]
    }

    /// Every legal action for the side to move, already filtered by the
    /// mandatory-capture and maximum-capture rules.
    #[must_use]
    pub fn actions(&self) -> Vec<Action> {
        movegen::generate_actions(self)
    }

    /// Computes the successor board of playing `source -> destination`,
    /// removing `captured` from the opponent and promoting on arrival if
    /// `promotes` is set (or the moving piece was already a king).
    pub(crate) fn transition(&self, source: Square, destination: Square, captured: u64, promotes: bool) -> Self {
        let mover = self.turn;
        let mut mover_mask = self.side_bitboard(mover);
        let mut opponent_mask = self.side_bitboard(mover.opponent());
        let mut kings = self.kings;

        let was_king = kings & source.to_mask() != 0;
        mover_mask &= !source.to_mask();
        kings &= !source.to_mask();

        opponent_mask &= !captured;
        kings &= !captured;

        mover_mask |= destination.to_mask();
        if was_king || promotes {
            kings |= destination.to_mask();
        }

        let (white, black) = match mover {
            Team::White => (mover_mask, opponent_mask),
            Team::Black => (opponent_mask, mover_mask),
        };

        Self {
            white,
            black,
            kings,
            turn: mover.opponent(),
        }
    }

    /// Applies `action` (which must be a member of `self.actions()`) and
    /// returns the successor board.
    #[must_use]
    pub fn apply(&self, action: &Action) -> Self {
        self.transition(
            action.source(),
            action.destination(),
            action.captured_bitboard(),
            action.is_promotion(),
        )
    }

    /// The outcome of this position for the side to move.
    ///
    /// A side with no pieces left has lost outright, independent of whose
    /// turn it is; a side to move with pieces but no legal action has
    /// also lost. See `DESIGN.md` for why both checks are needed.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        if self.black == 0 {
            return GameStatus::Won(Team::White);
        }
        if self.white == 0 {
            return GameStatus::Won(Team::Black);
        }
        if self.actions().is_empty() {
            return GameStatus::Won(self.turn.opponent());
        }
        if bitboard::popcount(self.white) == 1 && bitboard::popcount(self.black) == 1 {
            return GameStatus::Draw;
        }
        GameStatus::InProgress
    }

    /// Returns this board rotated 180 degrees with colors swapped: the
    /// position White would see if it were Black's turn from the mirror
    /// image of the board.
    #[must_use]
    pub fn rotate(&self) -> Self {
        let mirror = |bb: u64| {
            let mut out = 0u64;
            for sq in bitboard::bit_iter(bb) {
                let mirrored_index = 63 - u32::from(sq.index());
                out |= 1u64 << mirrored_index;
            }
            out
        };
        Self {
            white: mirror(self.black),
            black: mirror(self.white),
            kings: mirror(self.kings),
            turn: self.turn.opponent(),
        }
    }

    /// Counts the leaf nodes of the legal-action tree rooted at `self`, to
    /// the given `depth`.
    #[must_use]
    pub fn perft(&self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        self.actions()
            .iter()
            .map(|action| self.apply(action).perft(depth - 1))
            .sum()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..8u8).rev() {
            for col in 0..8u8 {
                let sq = Square::from_index(row * 8 + col);
                let mask = sq.to_mask();
                let ch = if self.white & mask != 0 {
                    if self.kings & mask != 0 {
                        'W'
                    } else {
                        'w'
                    }
                } else if self.black & mask != 0 {
                    if self.kings & mask != 0 {
                        'B'
                    } else {
                        'b'
                    }
                } else {
                    '.'
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

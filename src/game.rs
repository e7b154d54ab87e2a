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

//! The mutable game wrapper: move history, the halfmove clock, and
//! position-occurrence counts for repetition detection.

use std::collections::HashMap;

use crate::action::Action;
use crate::board::Board;
use crate::error::DamaError;
use crate::status::GameStatus;
use crate::team::Team;

/// A played game: a current [`Board`] plus enough history to undo moves
/// and detect repeated positions.
///
/// Unlike `Board`, `Game` owns mutable state and is not safe to mutate
/// concurrently from multiple threads; independent `Game`s share no state
/// and may be driven in parallel freely.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    board_history: Vec<Board>,
    history: Vec<(Action, u32)>,
    halfmove_clock: u32,
    move_count: u32,
    position_counts: HashMap<Board, u32>,
}

impl Game {
    /// A new game at the standard starting position.
    #[must_use]
    pub fn new() -> Self {
        Self::from_board(Board::new())
    }

    /// A new game whose current position is `board`, with empty history.
    #[must_use]
    pub fn from_board(board: Board) -> Self {
        let mut position_counts = HashMap::new();
        position_counts.insert(board, 1);
        Self {
            board,
            board_history: Vec::new(),
            history: Vec::new(),
            halfmove_clock: 0,
            move_count: 0,
            position_counts,
        }
    }

    /// The legal actions in the current position.
    #[must_use]
    pub fn actions(&self) -> Vec<Action> {
        self.board.actions()
    }

    /// The current board.
    #[must_use]
    #[inline]
    pub const fn board(&self) -> Board {
        self.board
    }

    /// The side to move in the current position.
    #[must_use]
    #[inline]
    pub const fn turn(&self) -> Team {
        self.board.turn()
    }

    /// The outcome of the current position.
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.board.status()
    }

    /// The number of moves played so far.
    #[must_use]
    #[inline]
    pub const fn move_count(&self) -> u32 {
        self.move_count
    }

    /// The number of consecutive plies without a capture or promotion.
    #[must_use]
    #[inline]
    pub const fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Plays `action`, which must be a member of [`actions`](Game::actions).
    ///
    /// # Errors
    ///
    /// Returns [`DamaError::IllegalMove`] if `action` is not currently
    /// legal.
    pub fn make_move(&mut self, action: &Action) -> Result<(), DamaError> {
        if !self.actions().contains(action) {
            return Err(DamaError::IllegalMove(action.notation()));
        }

        self.board_history.push(self.board);
        self.history.push((action.clone(), self.halfmove_clock));

        if action.is_capture() || action.is_promotion() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        self.board = self.board.apply(action);
        self.move_count += 1;
        *self.position_counts.entry(self.board).or_insert(0) += 1;

        Ok(())
    }

    /// Undoes the most recent move. Returns `false`, not an error, if
    /// there is no move to undo.
    pub fn undo_move(&mut self) -> bool {
        let Some((_, prev_clock)) = self.history.pop() else {
            return false;
        };
        let prev_board = self
            .board_history
            .pop()
            .expect("board_history must have one entry per history entry");

        if let Some(count) = self.position_counts.get_mut(&self.board) {
            *count -= 1;
            if *count == 0 {
                self.position_counts.remove(&self.board);
            }
        }

        self.board = prev_board;
        self.halfmove_clock = prev_clock;
        self.move_count -= 1;
        true
    }

    /// How many times the current position has occurred in this game.
    #[must_use]
    pub fn position_count(&self) -> u32 {
        self.position_counts.get(&self.board).copied().unwrap_or(0)
    }

    /// Whether the current position has occurred three or more times.
    #[must_use]
    pub fn is_threefold_repetition(&self) -> bool {
        self.position_count() >= 3
    }

    /// Discards all move history, keeping the current board as a fresh
    /// starting point.
    pub fn clear_history(&mut self) {
        self.board_history.clear();
        self.history.clear();
        self.move_count = 0;
        self.halfmove_clock = 0;
        self.position_counts.clear();
        self.position_counts.insert(self.board, 1);
    }

    /// Counts the leaf nodes of the legal-action tree rooted at the
    /// current position, to the given `depth`.
    #[must_use]
    pub fn perft(&self, depth: u32) -> u64 {
        self.board.perft(depth)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_restores_prior_board_and_counters() {
        let mut game = Game::new();
        let action = game.actions().into_iter().next().unwrap();
        game.make_move(&action).unwrap();
        assert_eq!(game.move_count(), 1);

        assert!(game.undo_move());
        assert_eq!(game.board(), Board::new());
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.position_count(), 1);
    }

    #[test]
    fn undo_on_fresh_game_returns_false() {
        let mut game = Game::new();
        assert!(!game.undo_move());
    }

    #[test]
    fn illegal_move_is_rejected() {
        let mut game = Game::new();
        let foreign_board =
            Board::from_squares(Team::White, &[crate::square::Square::D4], &[crate::square::Square::D5], &[])
                .unwrap();
        let bogus = foreign_board.actions().into_iter().next().unwrap();
        assert!(game.make_move(&bogus).is_err());
    }

    #[test]
    fn capture_resets_halfmove_clock() {
        let board = Board::from_squares(
            Team::White,
            &[crate::square::Square::D4],
            &[crate::square::Square::D5, crate::square::Square::H8],
            &[],
        )
        .unwrap();
        let mut game = Game::from_board(board);
        game.halfmove_clock = 5;
        let action = game.actions().into_iter().next().unwrap();
        game.make_move(&action).unwrap();
        assert_eq!(game.halfmove_clock(), 0);
    }

    #[test]
    fn threefold_repetition_detected() {
        // Shuffle a lone king back and forth between A1 and B1; with no
        // other white piece nearby, nothing forces a capture or promotion
        // to interrupt the repetition.
        let board = Board::from_squares(
            Team::White,
            &[crate::square::Square::A1],
            &[crate::square::Square::H8],
            &[crate::square::Square::A1],
        )
        .unwrap();
        let mut game = Game::from_board(board);
        for _ in 0..2 {
            let forward = game
                .actions()
                .into_iter()
                .find(|a| a.destination() == crate::square::Square::B1)
                .unwrap();
            game.make_move(&forward).unwrap();
            let back = game
                .actions()
                .into_iter()
                .find(|a| a.destination() == crate::square::Square::A1)
                .unwrap();
            game.make_move(&back).unwrap();
        }
        assert!(game.position_count() >= 3);
        assert!(game.is_threefold_repetition());
    }
}

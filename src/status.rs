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

use std::fmt;

use crate::team::Team;

/// The outcome of a board position, from the perspective of the side to
/// move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Neither side has won and the position is not a draw.
    InProgress,
    /// The game is drawn (currently: both sides down to a single piece).
    Draw,
    /// `Team` has won, either because the opponent has no pieces left
    /// (checked independent of whose turn it is) or because the side to
    /// move has pieces but no legal action.
    Won(Team),
}

impl GameStatus {
    /// Whether the position is still being played.
    #[must_use]
    #[inline]
    pub const fn is_in_progress(self) -> bool {
        matches!(self, Self::InProgress)
    }

    /// Whether the position is a draw.
    #[must_use]
    #[inline]
    pub const fn is_draw(self) -> bool {
        matches!(self, Self::Draw)
    }

    /// Whether a side has won.
    #[must_use]
    #[inline]
    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won(_))
    }

    /// Whether the game has concluded, by draw or win.
    #[must_use]
    #[inline]
    pub const fn is_over(self) -> bool {
        !self.is_in_progress()
    }

    /// The winning team, if any.
    #[must_use]
    #[inline]
    pub const fn winner(self) -> Option<Team> {
        match self {
            Self::Won(team) => Some(team),
            Self::InProgress | Self::Draw => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => write!(f, "in progress"),
            Self::Draw => write!(f, "draw"),
            Self::Won(team) => write!(f, "{team} wins"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates_agree_with_variant() {
        assert!(GameStatus::InProgress.is_in_progress());
        assert!(!GameStatus::InProgress.is_over());

        assert!(GameStatus::Draw.is_draw());
        assert!(GameStatus::Draw.is_over());
        assert_eq!(GameStatus::Draw.winner(), None);

        let won = GameStatus::Won(Team::White);
        assert!(won.is_won());
        assert!(won.is_over());
        assert_eq!(won.winner(), Some(Team::White));
    }
}

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

//! Legal action generation.
//!
//! Turkish Draughts has no forced-capture analogue in chess, so this is
//! original DFS-based search against the capture rules rather than a port
//! of any single teacher routine. Captures are found by recursively
//! extending jump chains, treating already-captured enemies (and the
//! moving piece's own vacated origin) as empty squares; a chain only
//! becomes a legal [`Action`] at a node where no further jump is possible.
//! Among all found chains, only those with the maximum capture count are
//! legal (ties are kept as distinct actions).

use crate::action::Action;
use crate::bitboard::{self, RANK_1, RANK_8};
use crate::square::Square;
use crate::team::Team;

use super::Board;

/// The four orthogonal directions, expressed as `(delta_row, delta_col)`.
/// Row increases toward White's promotion rank (north).
const DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Intermediate representation of one found capture chain, before the
/// maximum-capture filter and promotion/delta computation are applied.
struct Chain {
    path: Vec<Square>,
    captured: u64,
}

fn neighbor(sq: Square, delta_row: i8, delta_col: i8) -> Option<Square> {
    let row = i8::try_from(sq.row()).ok()? + delta_row;
    let col = i8::try_from(sq.col()).ok()? + delta_col;
    if (0..8).contains(&row) && (0..8).contains(&col) {
        Square::from_row_col(row as u8, col as u8).ok()
    } else {
        None
    }
}

fn is_promotion_square(team: Team, sq: Square) -> bool {
    match team {
        Team::White => sq.to_mask() & RANK_8 != 0,
        Team::Black => sq.to_mask() & RANK_1 != 0,
    }
}

/// Depth-first search over a man's capture chains starting from `current`.
///
/// `other_friendly` excludes the moving piece's own origin square (it has
/// vacated it); `enemy` is the full enemy mask, with squares already
/// captured in this chain tracked separately in `captured_so_far` rather
/// than removed, so the same enemy can never be jumped twice.
fn dfs_man_captures(
    current: Square,
    path: &mut Vec<Square>,
    captured_so_far: u64,
    other_friendly: u64,
    enemy: u64,
    results: &mut Vec<Chain>,
) {
    let mut extended = false;
    for (delta_row, delta_col) in DIRECTIONS {
        let Some(mid) = neighbor(current, delta_row, delta_col) else {
            continue;
        };
        let Some(landing) = neighbor(mid, delta_row, delta_col) else {
            continue;
        };
        let mid_mask = mid.to_mask();
        let landing_mask = landing.to_mask();
        let enemy_present = enemy & mid_mask != 0 && captured_so_far & mid_mask == 0;
        if !enemy_present {
            continue;
        }
        let landing_blocked =
            other_friendly & landing_mask != 0 || (enemy & landing_mask != 0 && captured_so_far & landing_mask == 0);
        if landing_blocked {
            continue;
        }
        extended = true;
        path.push(landing);
        dfs_man_captures(landing, path, captured_so_far | mid_mask, other_friendly, enemy, results);
        path.pop();
    }
    if !extended && captured_so_far != 0 {
        results.push(Chain {
            path: path.clone(),
            captured: captured_so_far,
        });
    }
}

/// Depth-first search over a king's capture chains. A king slides any
/// distance along a ray, may jump exactly one enemy per ray, and may land
/// on any empty-or-already-captured square beyond that enemy and before
/// the next obstruction.
fn dfs_king_captures(
    current: Square,
    path: &mut Vec<Square>,
    captured_so_far: u64,
    other_friendly: u64,
    enemy: u64,
    results: &mut Vec<Chain>,
) {
    let mut extended = false;
    for (delta_row, delta_col) in DIRECTIONS {
        // Scan empty/already-captured squares until an obstruction or an
        // uncaptured enemy is found.
        let mut scan = current;
        let enemy_square = loop {
            let Some(next) = neighbor(scan, delta_row, delta_col) else {
                break None;
            };
            let next_mask = next.to_mask();
            if other_friendly & next_mask != 0 {
                break None;
            }
            if enemy & next_mask != 0 && captured_so_far & next_mask == 0 {
                break Some(next);
            }
            scan = next;
        };
        let Some(enemy_square) = enemy_square else {
            continue;
        };
        let enemy_mask = enemy_square.to_mask();
        // Walk past the enemy, emitting one recursive branch per reachable
        // landing square.
        let mut land_scan = enemy_square;
        loop {
            let Some(landing) = neighbor(land_scan, delta_row, delta_col) else {
                break;
            };
            let landing_mask = landing.to_mask();
            if other_friendly & landing_mask != 0 {
                break;
            }
            if enemy & landing_mask != 0 && captured_so_far & landing_mask == 0 {
                break;
            }
            extended = true;
            path.push(landing);
            dfs_king_captures(
                landing,
                path,
                captured_so_far | enemy_mask,
                other_friendly,
                enemy,
                results,
            );
            path.pop();
            land_scan = landing;
        }
    }
    if !extended && captured_so_far != 0 {
        results.push(Chain {
            path: path.clone(),
            captured: captured_so_far,
        });
    }
}

fn collect_capture_chains(board: &Board) -> Vec<Chain> {
    let turn = board.turn();
    let friendly = board.side_bitboard(turn);
    let enemy = board.side_bitboard(turn.opponent());
    let kings = board.kings_bitboard();

    let mut chains = Vec::new();
    for origin in bitboard::bit_iter(friendly) {
        let other_friendly = friendly & !origin.to_mask();
        let mut path = vec![origin];
        if kings & origin.to_mask() != 0 {
            dfs_king_captures(origin, &mut path, 0, other_friendly, enemy, &mut chains);
        } else {
            dfs_man_captures(origin, &mut path, 0, other_friendly, enemy, &mut chains);
        }
    }
    chains
}

fn quiet_man_directions(team: Team) -> [(i8, i8); 3] {
    match team {
        Team::White => [(1, 0), (0, 1), (0, -1)],
        Team::Black => [(-1, 0), (0, 1), (0, -1)],
    }
}

fn collect_quiet_actions(board: &Board) -> Vec<(Vec<Square>, u64)> {
    let turn = board.turn();
    let friendly = board.side_bitboard(turn);
    let enemy = board.side_bitboard(turn.opponent());
    let kings = board.kings_bitboard();
    let occupied = friendly | enemy;

    let mut moves = Vec::new();
    for origin in bitboard::bit_iter(friendly) {
        if kings & origin.to_mask() != 0 {
            for (delta_row, delta_col) in DIRECTIONS {
                let mut scan = origin;
                while let Some(next) = neighbor(scan, delta_row, delta_col) {
                    if occupied & next.to_mask() != 0 {
                        break;
                    }
                    moves.push((vec![origin, next], 0));
                    scan = next;
                }
            }
        } else {
            for (delta_row, delta_col) in quiet_man_directions(turn) {
                if let Some(next) = neighbor(origin, delta_row, delta_col) {
                    if occupied & next.to_mask() == 0 {
                        moves.push((vec![origin, next], 0));
                    }
                }
            }
        }
    }
    moves
}

/// Generates every legal action for the side to move on `board`, already
/// filtered by the mandatory-capture and maximum-capture rules.
pub(crate) fn generate_actions(board: &Board) -> Vec<Action> {
    let turn = board.turn();
    let kings = board.kings_bitboard();
    let chains = collect_capture_chains(board);

    let candidates: Vec<(Vec<Square>, u64)> = if let Some(max_captures) =
        chains.iter().map(|chain| bitboard::popcount(chain.captured)).max()
    {
        chains
            .into_iter()
            .filter(|chain| bitboard::popcount(chain.captured) == max_captures)
            .map(|chain| (chain.path, chain.captured))
            .collect()
    } else {
        collect_quiet_actions(board).into_iter().collect()
    };

    candidates
        .into_iter()
        .map(|(path, captured)| {
            let source = path[0];
            let destination = path[path.len() - 1];
            let mover_is_king = kings & source.to_mask() != 0;
            let promotes = !mover_is_king && is_promotion_square(turn, destination);
            let successor = board.transition(source, destination, captured, promotes);
            let delta = (
                board.white_bitboard() ^ successor.white_bitboard(),
                board.black_bitboard() ^ successor.black_bitboard(),
                board.kings_bitboard() ^ successor.kings_bitboard(),
            );
            Action::new(path, captured, promotes, delta)
        })
        .collect()
}

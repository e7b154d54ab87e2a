//! End-to-end tests against the published `Board`/`Game` contract, the way
//! an external binding would exercise this crate: no access to private
//! items, only the `dama_core` public surface.

use dama_core::{Board, Game, GameStatus, Square, Team};

struct TestPosition {
    white: &'static [Square],
    black: &'static [Square],
    kings: &'static [Square],
    turn: Team,
    perft_by_depth: &'static [u64],
}

lazy_static::lazy_static! {
    static ref TEST_POSITIONS: Vec<TestPosition> = vec![
        TestPosition {
            white: &[Square::D4],
            black: &[Square::D5, Square::H8],
            kings: &[],
            turn: Team::White,
            // The only legal move is the forced D4xD6 capture.
            perft_by_depth: &[1, 1],
        },
        TestPosition {
            white: &[Square::D7],
            black: &[Square::A1],
            kings: &[],
            turn: Team::White,
            // No capture is available; the man can step to D8 (promoting),
            // E7, or C7.
            perft_by_depth: &[1, 3],
        },
    ];
}

#[test]
fn starting_position_perft_ladder() {
    let board = Board::new();
    assert_eq!(board.perft(0), 1);
    assert_eq!(board.perft(1), 8);
    assert_eq!(board.perft(2), 64);
}

#[test]
fn table_driven_perft_positions() {
    for position in TEST_POSITIONS.iter() {
        let board =
            Board::from_squares(position.turn, position.white, position.black, position.kings).unwrap();
        for (depth, expected) in position.perft_by_depth.iter().enumerate() {
            assert_eq!(board.perft(depth as u32), *expected);
        }
    }
}

#[test]
fn mandatory_capture_scenario() {
    let board = Board::from_squares(Team::White, &[Square::D4], &[Square::D5, Square::H8], &[]).unwrap();
    let actions = board.actions();
    assert_eq!(actions.len(), 1);
    assert!(actions[0].notation().contains('x'));
    assert_eq!(actions[0].captured_bitboard(), Square::D5.to_mask());
}

#[test]
fn promotion_scenario() {
    let board = Board::from_squares(Team::White, &[Square::D7], &[Square::A1], &[]).unwrap();
    let actions = board.actions();
    assert!(actions
        .iter()
        .any(|a| a.destination() == Square::D8 && a.is_promotion() && a.notation().ends_with("=K")));
}

#[test]
fn one_versus_one_draw_scenario() {
    let board = Board::from_squares(Team::White, &[Square::A1], &[Square::H8], &[]).unwrap();
    assert!(board.status().is_draw());
}

#[test]
fn annihilation_win_scenario() {
    let board = Board::from_squares(Team::White, &[Square::A1, Square::B1], &[], &[]).unwrap();
    assert_eq!(board.status(), GameStatus::Won(Team::White));
}

#[test]
fn rotation_scenario() {
    let board = Board::from_squares(Team::White, &[Square::B3], &[Square::F5], &[]).unwrap();
    let rotated = board.rotate();
    assert_eq!(rotated.white_pieces(), vec![Square::C4]);
    assert_eq!(rotated.black_pieces(), vec![Square::G6]);
    assert_eq!(rotated.turn(), Team::Black);
}

#[test]
fn undo_scenario() {
    let mut game = Game::new();
    let action = game.actions().into_iter().next().unwrap();
    game.make_move(&action).unwrap();
    assert!(game.undo_move());
    assert_eq!(game.board(), Board::new());
    assert_eq!(game.move_count(), 0);
    assert_eq!(game.position_count(), 1);
}

#[test]
fn round_trip_through_bitboards() {
    let board = Board::new();
    let (white, black, kings, turn) = board.bitboards();
    assert_eq!(Board::from_bitboards(turn, white, black, kings).unwrap(), board);
}

#[test]
fn square_notation_round_trip() {
    for idx in 0..64u8 {
        let sq = Square::from_row_col(idx / 8, idx % 8).unwrap();
        assert_eq!(Square::from_notation(&sq.notation().to_lowercase()).unwrap(), sq);
    }
}

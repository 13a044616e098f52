//! Property-based tests for the board state machine.
//!
//! Uses proptest to verify, over arbitrary move sequences:
//! 1. Exactly one of {InProgress, Won(X), Won(O), Draw} holds after each move.
//! 2. Turn alternation: X occupies as many cells as O, or exactly one more.
//! 3. A terminal state, once reached, rejects every further move unchanged.

use proptest::prelude::*;
use taskboard_core::{Board, GameStatus, Player};

/// Strategy for a sequence of cell indices, valid and invalid alike.
fn arb_moves() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..12, 0..24)
}

fn mark_counts(board: &Board) -> (usize, usize) {
    let x = board
        .cells()
        .iter()
        .filter(|c| **c == Some(Player::X))
        .count();
    let o = board
        .cells()
        .iter()
        .filter(|c| **c == Some(Player::O))
        .count();
    (x, o)
}

proptest! {
    #[test]
    fn turn_alternation_invariant(moves in arb_moves()) {
        let mut board = Board::new();
        for index in moves {
            board.play(index);
            let (x, o) = mark_counts(&board);
            prop_assert!(x == o || x == o + 1, "x={x} o={o}");
        }
    }

    #[test]
    fn status_is_consistent_with_cells(moves in arb_moves()) {
        let mut board = Board::new();
        for index in moves {
            board.play(index);
            let occupied = board.cells().iter().filter(|c| c.is_some()).count();
            match board.status() {
                GameStatus::Draw => prop_assert_eq!(occupied, 9),
                GameStatus::InProgress => prop_assert!(occupied < 9),
                GameStatus::Won(_) => prop_assert!(occupied >= 5),
            }
        }
    }

    #[test]
    fn terminal_state_is_frozen(moves in arb_moves(), extra in arb_moves()) {
        let mut board = Board::new();
        for index in moves {
            board.play(index);
        }
        prop_assume!(board.status().is_terminal());

        let snapshot = board.clone();
        for index in extra {
            prop_assert!(!board.play(index));
        }
        prop_assert_eq!(board, snapshot);
    }

    #[test]
    fn win_is_never_unachieved(moves in arb_moves()) {
        let mut board = Board::new();
        let mut seen_winner: Option<Player> = None;
        for index in moves {
            board.play(index);
            if let GameStatus::Won(player) = board.status() {
                if let Some(previous) = seen_winner {
                    prop_assert_eq!(previous, player);
                }
                seen_winner = Some(player);
            } else {
                prop_assert!(seen_winner.is_none());
            }
        }
    }

    #[test]
    fn reset_always_restores_initial_state(moves in arb_moves()) {
        let mut board = Board::new();
        for index in moves {
            board.play(index);
        }
        board.reset();
        prop_assert_eq!(board, Board::new());
    }

    #[test]
    fn rejected_move_leaves_board_unchanged(moves in arb_moves(), index in 0usize..12) {
        let mut board = Board::new();
        for m in moves {
            board.play(m);
        }
        let snapshot = board.clone();
        if !board.play(index) {
            prop_assert_eq!(board, snapshot);
        }
    }
}

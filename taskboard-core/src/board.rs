//! Tic-tac-toe board state machine.
//!
//! Nine cells, strict turn alternation starting with X, and a derived
//! [`GameStatus`] recomputed after every accepted move. Moves into occupied
//! cells, out-of-range indices, and moves after a terminal state are rejected
//! as no-ops so a winning line, once achieved, is never un-achieved.

use serde::{Deserialize, Serialize};

/// The eight winning cell triples: rows, columns, diagonals.
const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// The first player; always opens the game.
    X,
    /// The second player.
    O,
}

impl Player {
    /// Returns the opposing player.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X => write!(f, "X"),
            Self::O => write!(f, "O"),
        }
    }
}

/// Derived game status. `Won` and `Draw` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Moves are still being accepted.
    InProgress,
    /// The given player completed a winning line.
    Won(Player),
    /// All nine cells are occupied with no winning line.
    Draw,
}

impl GameStatus {
    /// Returns `true` for `Won` or `Draw`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Tic-tac-toe board state: cells, turn flag, and derived status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Player>; 9],
    current_player: Player,
    status: GameStatus,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates an empty board with X to move.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [None; 9],
            current_player: Player::X,
            status: GameStatus::InProgress,
        }
    }

    /// Returns the nine cells in row-major order.
    #[must_use]
    pub const fn cells(&self) -> &[Option<Player>; 9] {
        &self.cells
    }

    /// Returns the player whose turn it is.
    #[must_use]
    pub const fn current_player(&self) -> Player {
        self.current_player
    }

    /// Returns the current game status.
    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    /// Attempts to place the current player's mark at `index`.
    ///
    /// Returns `false` without changing the board if the index is out of
    /// range, the cell is occupied, or the game has already ended. On an
    /// accepted move the status is recomputed, and the turn passes to the
    /// other player only while the game is still in progress.
    pub fn play(&mut self, index: usize) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        let Some(cell) = self.cells.get_mut(index) else {
            return false;
        };
        if cell.is_some() {
            return false;
        }
        *cell = Some(self.current_player);
        self.status = self.compute_status();
        if !self.status.is_terminal() {
            self.current_player = self.current_player.other();
        }
        true
    }

    /// Returns the board to the initial state: empty cells, X to move.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn compute_status(&self) -> GameStatus {
        for [a, b, c] in WIN_LINES {
            if let Some(player) = self.cells[a]
                && self.cells[b] == Some(player)
                && self.cells[c] == Some(player)
            {
                return GameStatus::Won(player);
            }
        }
        if self.cells.iter().all(Option::is_some) {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }
}

//! Core board state representation.
//!
//! `Board` is the central model for the engine. It stores the row-major cell
//! grid (row 0 is the top row), the side to move, and the shape
//! configuration. Boards are value objects: the search clones them at every
//! branch and the only mutation path is the atomic `drop_piece` operation,
//! which returns an independent successor with the turn flipped.

use crate::board::board_types::{BoardConfig, Cell, Player};
use crate::errors::GameErrors;
use crate::utils::notation::{generate_notation, parse_notation};

/// Grid plus side to move. Gravity invariant: within any column every
/// occupied cell sits below every empty cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Row-major cells, `rows * cols` entries, row 0 at the top.
    pub cells: Vec<Cell>,
    /// Shape parameters this board was created with.
    pub config: BoardConfig,
    /// Side to move.
    pub turn: Player,
}

impl Default for Board {
    fn default() -> Self {
        Self::new_game()
    }
}

impl Board {
    /// Empty board for an arbitrary shape. `Min` moves first.
    pub fn new_empty(config: BoardConfig) -> Self {
        Self {
            cells: vec![Cell::Empty; config.rows * config.cols],
            config,
            turn: Player::Min,
        }
    }

    /// Empty standard 6x7 board, `Min` to move.
    #[inline]
    pub fn new_game() -> Self {
        Self::new_empty(BoardConfig::default())
    }

    #[inline]
    pub fn from_notation(text: &str) -> Result<Self, GameErrors> {
        parse_notation(text)
    }

    #[inline]
    pub fn get_notation(&self) -> String {
        generate_notation(self)
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.config.cols + col
    }

    /// Bounds-checked cell read.
    pub fn cell(&self, row: usize, col: usize) -> Result<Cell, GameErrors> {
        if row >= self.config.rows || col >= self.config.cols {
            return Err(GameErrors::OutOfBounds(row, col));
        }
        Ok(self.cells[self.index(row, col)])
    }

    #[inline]
    pub(crate) fn cell_unchecked(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.config.cols + col]
    }

    /// Columns with at least one empty cell, in increasing index order.
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..self.config.cols)
            .filter(|&col| self.cell_unchecked(0, col).is_empty())
            .collect()
    }

    /// Row a piece dropped into `col` would land on, or `None` if the column
    /// is full. Pieces stack from the bottom, so this is the deepest empty
    /// cell.
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        (0..self.config.rows)
            .rev()
            .find(|&row| self.cell_unchecked(row, col).is_empty())
    }

    /// Atomic move operation. Returns a new board with one piece of `player`
    /// added at the lowest empty cell of `col` and the turn flipped to the
    /// opposite side. The receiver is never mutated; a full column is
    /// reported as `ColumnFull`, which callers probing moves treat as an
    /// expected skip condition.
    pub fn drop_piece(&self, col: usize, player: Player) -> Result<Board, GameErrors> {
        if col >= self.config.cols {
            return Err(GameErrors::ColumnOutOfRange(col));
        }
        let row = self
            .landing_row(col)
            .ok_or(GameErrors::ColumnFull(col))?;

        let mut next = self.clone();
        let idx = next.index(row, col);
        next.cells[idx] = Cell::for_player(player);
        next.turn = player.opposite();
        Ok(next)
    }

    /// Visit every contiguous run of `connect` cells along a row, a column,
    /// or either diagonal. The window buffer is reused between calls.
    pub fn for_each_window<F>(&self, mut visit: F)
    where
        F: FnMut(&[Cell]),
    {
        let rows = self.config.rows;
        let cols = self.config.cols;
        let n = self.config.connect;
        if n == 0 || n > rows.max(cols) {
            return;
        }
        let mut window = vec![Cell::Empty; n];

        // Horizontal runs.
        if cols >= n {
            for row in 0..rows {
                for col in 0..=cols - n {
                    for (k, slot) in window.iter_mut().enumerate() {
                        *slot = self.cell_unchecked(row, col + k);
                    }
                    visit(&window);
                }
            }
        }

        // Vertical runs.
        if rows >= n {
            for row in 0..=rows - n {
                for col in 0..cols {
                    for (k, slot) in window.iter_mut().enumerate() {
                        *slot = self.cell_unchecked(row + k, col);
                    }
                    visit(&window);
                }
            }
        }

        // Down-right diagonals.
        if rows >= n && cols >= n {
            for row in 0..=rows - n {
                for col in 0..=cols - n {
                    for (k, slot) in window.iter_mut().enumerate() {
                        *slot = self.cell_unchecked(row + k, col + k);
                    }
                    visit(&window);
                }
            }

            // Down-left diagonals.
            for row in 0..=rows - n {
                for col in n - 1..cols {
                    for (k, slot) in window.iter_mut().enumerate() {
                        *slot = self.cell_unchecked(row + k, col - k);
                    }
                    visit(&window);
                }
            }
        }
    }

    /// Winning side, if any window holds a full same-side run.
    pub fn winner(&self) -> Option<Player> {
        let mut found: Option<Player> = None;
        self.for_each_window(|window| {
            if found.is_some() {
                return;
            }
            if let Some(owner) = window[0].owner() {
                if window.iter().all(|&c| c == window[0]) {
                    found = Some(owner);
                }
            }
        });
        found
    }

    /// True when the top row has no empty cell.
    pub fn is_full(&self) -> bool {
        (0..self.config.cols).all(|col| !self.cell_unchecked(0, col).is_empty())
    }

    /// Terminal test: a decided or drawn-full position.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Number of occupied cells.
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }
}

//! Compact text notation for board positions.
//!
//! A position is written as the rows from top to bottom joined by `/`, using
//! `X` for Max pieces, `O` for Min pieces and `.` for empty cells, followed
//! by a space and the side to move (`x` for Max, `o` for Min). The empty
//! standard game is `......./......./......./......./......./....... o`.

use crate::board::board_state::Board;
use crate::board::board_types::{BoardConfig, Cell, Player, STANDARD_CONNECT};
use crate::errors::GameErrors;

/// Parse a notation string into a board.
///
/// The shape is inferred from the text (every row must have the same width);
/// the winning run length is always the standard four. The gravity invariant
/// is validated: a piece above an empty cell in the same column is rejected.
pub fn parse_notation(text: &str) -> Result<Board, GameErrors> {
    let mut parts = text.split_whitespace();
    let grid = parts
        .next()
        .ok_or_else(|| GameErrors::InvalidNotationString("missing grid field".to_string()))?;
    let turn = parts
        .next()
        .ok_or_else(|| GameErrors::InvalidNotationString("missing turn field".to_string()))?;
    if parts.next().is_some() {
        return Err(GameErrors::InvalidNotationString(
            "trailing fields after turn".to_string(),
        ));
    }

    let rows: Vec<&str> = grid.split('/').collect();
    if rows.is_empty() {
        return Err(GameErrors::InvalidNotationString(
            "grid has no rows".to_string(),
        ));
    }
    let cols = rows[0].chars().count();
    if cols == 0 {
        return Err(GameErrors::InvalidNotationString(
            "grid rows are empty".to_string(),
        ));
    }
    if rows.iter().any(|row| row.chars().count() != cols) {
        return Err(GameErrors::InvalidNotationString(
            "grid rows have unequal widths".to_string(),
        ));
    }

    let config = BoardConfig {
        rows: rows.len(),
        cols,
        connect: STANDARD_CONNECT,
    };
    let mut board = Board::new_empty(config);

    for (row_index, row) in rows.iter().enumerate() {
        for (col_index, ch) in row.chars().enumerate() {
            let cell = match ch {
                '.' => Cell::Empty,
                'X' => Cell::Max,
                'O' => Cell::Min,
                other => return Err(GameErrors::InvalidNotationChar(other)),
            };
            board.cells[row_index * cols + col_index] = cell;
        }
    }

    // Gravity check: scanning each column downward, a piece may never sit
    // directly above an empty cell.
    for col in 0..config.cols {
        for row in 0..config.rows - 1 {
            let here = board.cell_unchecked(row, col);
            let below = board.cell_unchecked(row + 1, col);
            if !here.is_empty() && below.is_empty() {
                return Err(GameErrors::FloatingPiece(row, col));
            }
        }
    }

    board.turn = match turn {
        "x" => Player::Max,
        "o" => Player::Min,
        _ => {
            return Err(GameErrors::InvalidNotationString(format!(
                "invalid turn field: {turn}"
            )))
        }
    };

    Ok(board)
}

/// Render a board into its notation string. Inverse of `parse_notation`.
pub fn generate_notation(board: &Board) -> String {
    let mut out = String::new();
    for row in 0..board.config.rows {
        if row > 0 {
            out.push('/');
        }
        for col in 0..board.config.cols {
            out.push(match board.cell_unchecked(row, col) {
                Cell::Empty => '.',
                Cell::Max => 'X',
                Cell::Min => 'O',
            });
        }
    }
    out.push(' ');
    out.push(match board.turn {
        Player::Max => 'x',
        Player::Min => 'o',
    });
    out
}

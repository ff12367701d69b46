//! Terminal-oriented Unicode board renderer.
//!
//! Creates a human-readable board view for debugging, tests, and diagnostics
//! in text environments.

use crate::board::board_state::Board;
use crate::board::board_types::Cell;

/// Render the board to a Unicode string for terminal output.
///
/// Columns are labeled with their drop indices; row 0 is printed at the top.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    out.push(' ');
    for col in 0..board.config.cols {
        out.push(' ');
        out.push_str(&col.to_string());
    }
    out.push('\n');

    for row in 0..board.config.rows {
        out.push(' ');
        for col in 0..board.config.cols {
            out.push(' ');
            out.push(match board.cell_unchecked(row, col) {
                Cell::Empty => '·',
                Cell::Max => '●',
                Cell::Min => '○',
            });
        }
        out.push('\n');
    }

    out.push(' ');
    for col in 0..board.config.cols {
        out.push(' ');
        out.push_str(&col.to_string());
    }

    out
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::board::board_types::Player;

    #[test]
    fn renders_pieces_at_their_cells() {
        let board = Board::new_game()
            .drop_piece(3, Player::Min)
            .unwrap()
            .drop_piece(3, Player::Max)
            .unwrap();
        let text = render_board(&board);
        let lines: Vec<&str> = text.lines().collect();

        // Header, six rows, footer.
        assert_eq!(lines.len(), 8);
        assert!(lines[0].contains("0 1 2 3 4 5 6"));
        assert!(lines[6].contains('○'));
        assert!(lines[5].contains('●'));
    }
}

//! Scoring utilities for the Fig Four engine.
//!
//! This module centralizes the static board heuristic, score sentinels, the
//! evaluation-mode type shared by search and wire protocol, and the one
//! canonical batch reduction used everywhere a group of scores is folded to a
//! single value. Scores are modeled as 32-bit signed integers because that is
//! exactly what the accelerator link transmits.
//!
//! Conventions:
//! - Positive scores favor `Max`; negative scores favor `Min`.
//! - `WIN_SCORE` is the magnitude contributed by a completed four-run.
//! - `MIN_SCORE` / `MAX_SCORE` are extreme sentinels that dominate every
//!   heuristic value; they initialize alpha-beta windows and stand in for a
//!   failed accelerator transaction.

use crate::board::board_state::Board;
use crate::board::board_types::{Cell, Player};
use crate::errors::GameErrors;

/// Numeric representation of an evaluation score.
///
/// A `Score` represents the engine's evaluation of a position from the
/// perspective where positive values favor `Max` and negative values favor
/// `Min`. The type matches the signed 32-bit payload of an accelerator
/// response so local and offloaded evaluation agree bit for bit.
pub type Score = i32;

/// A very low sentinel score used to represent a decisive loss for `Max`.
///
/// Chosen large in magnitude so it dominates ordinary heuristic differences,
/// while leaving headroom inside `i32` for alpha-beta arithmetic.
pub const MIN_SCORE: Score = -1_000_000_000;
/// A very high sentinel score used to represent a decisive win for `Max`.
pub const MAX_SCORE: Score = 1_000_000_000;

/// Heuristic value of a completed four-run.
pub const WIN_SCORE: Score = 100_000;
/// Heuristic value of three own pieces plus one empty cell in a window.
pub const THREE_RUN_SCORE: Score = 100;
/// Heuristic value of two own pieces plus two empty cells in a window.
pub const TWO_RUN_SCORE: Score = 10;
/// Heuristic value of each own piece in the center column.
pub const CENTER_CELL_SCORE: Score = 3;

/// Which side's advantage an evaluation call should favor.
///
/// The mode selects the fold direction when a batch of sibling boards is
/// reduced to a single scalar, and it is carried in the first byte of a
/// request packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalMode {
    Maximize,
    Minimize,
}

impl EvalMode {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            EvalMode::Maximize => EvalMode::Minimize,
            EvalMode::Minimize => EvalMode::Maximize,
        }
    }

    /// Mode a node maximizing for `player` evaluates in.
    #[inline]
    pub const fn for_player(player: Player) -> Self {
        match player {
            Player::Max => EvalMode::Maximize,
            Player::Min => EvalMode::Minimize,
        }
    }

    /// Wire encoding of the mode byte.
    #[inline]
    pub const fn mode_byte(self) -> u8 {
        match self {
            EvalMode::Maximize => 1,
            EvalMode::Minimize => 0,
        }
    }

    /// Inverse of `mode_byte`. Any value other than 0 or 1 is corruption.
    pub fn from_mode_byte(byte: u8) -> Result<Self, GameErrors> {
        match byte {
            1 => Ok(EvalMode::Maximize),
            0 => Ok(EvalMode::Minimize),
            other => Err(GameErrors::InvalidModeByte(other)),
        }
    }
}

/// The score substituted when an accelerator transaction fails.
///
/// A maximizing batch degrades to `MIN_SCORE` and a minimizing batch to
/// `MAX_SCORE`, so the affected branch reads as maximally unfavorable to the
/// requester instead of aborting the search.
#[inline]
pub const fn sentinel_score(mode: EvalMode) -> Score {
    match mode {
        EvalMode::Maximize => MIN_SCORE,
        EvalMode::Minimize => MAX_SCORE,
    }
}

/// Static heuristic evaluation of a board.
///
/// Two additive components, each a pure function of cell contents (the side
/// to move never influences the score):
/// 1. Center bias: each `Max` piece in the center column adds
///    `CENTER_CELL_SCORE`, each `Min` piece subtracts it.
/// 2. Window sum: every contiguous run of `connect` cells along a row,
///    column, or diagonal is classified by its piece counts. A full own-side
///    run scores `WIN_SCORE`, three own pieces with one empty score
///    `THREE_RUN_SCORE`, two own pieces with two empties score
///    `TWO_RUN_SCORE`, with mirrored negatives for `Min`. Mixed windows and
///    other compositions score zero.
pub fn score_board(board: &Board) -> Score {
    let mut total = 0;

    let center = board.config.center_column();
    for row in 0..board.config.rows {
        total += match board.cell_unchecked(row, center) {
            Cell::Max => CENTER_CELL_SCORE,
            Cell::Min => -CENTER_CELL_SCORE,
            Cell::Empty => 0,
        };
    }

    board.for_each_window(|window| {
        total += score_window(window);
    });

    total
}

fn score_window(window: &[Cell]) -> Score {
    let mut max_count = 0;
    let mut min_count = 0;
    let mut empty_count = 0;
    for &cell in window {
        match cell {
            Cell::Max => max_count += 1,
            Cell::Min => min_count += 1,
            Cell::Empty => empty_count += 1,
        }
    }

    let full = window.len();
    if max_count == full {
        WIN_SCORE
    } else if min_count == full {
        -WIN_SCORE
    } else if max_count == full - 1 && empty_count == 1 {
        THREE_RUN_SCORE
    } else if min_count == full - 1 && empty_count == 1 {
        -THREE_RUN_SCORE
    } else if max_count == full - 2 && empty_count == 2 {
        TWO_RUN_SCORE
    } else if min_count == full - 2 && empty_count == 2 {
        -TWO_RUN_SCORE
    } else {
        0
    }
}

/// Fold a group of scores into one value.
///
/// This is the single reduction used by the local batch evaluator, the
/// accelerator state machine, and anything else that collapses sibling
/// scores: strict comparison, so on equal values the earliest (lowest index)
/// score wins. Keeping one implementation guarantees the local and offloaded
/// evaluation paths can never disagree on tie-breaks.
pub fn reduce_scores(scores: &[Score], mode: EvalMode) -> Result<Score, GameErrors> {
    let (&first, rest) = scores.split_first().ok_or(GameErrors::EmptyBatch)?;
    let mut best = first;
    for &score in rest {
        let improves = match mode {
            EvalMode::Maximize => score > best,
            EvalMode::Minimize => score < best,
        };
        if improves {
            best = score;
        }
    }
    Ok(best)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::board::board_types::BoardConfig;

    #[test]
    fn empty_board_scores_zero() {
        assert_eq!(score_board(&Board::new_game()), 0);
    }

    #[test]
    fn center_column_pieces_carry_bias() {
        let board = Board::new_game().drop_piece(3, Player::Max).unwrap();
        assert_eq!(score_board(&board), CENTER_CELL_SCORE);

        let board = Board::new_game().drop_piece(3, Player::Min).unwrap();
        assert_eq!(score_board(&board), -CENTER_CELL_SCORE);

        // Off-center single pieces contribute nothing: every window they
        // touch has three empties.
        let board = Board::new_game().drop_piece(0, Player::Max).unwrap();
        assert_eq!(score_board(&board), 0);
    }

    #[test]
    fn three_run_with_open_cell_scores_per_window() {
        // Three Min pieces stacked in column 0. One vertical window holds
        // them plus the empty cell above.
        let mut board = Board::new_game();
        for _ in 0..3 {
            board = board.drop_piece(0, Player::Min).unwrap();
        }
        // Vertical: -100. Two-run windows also appear vertically (rows 1..5
        // and 0..4 hold two or fewer pieces) and horizontally along the
        // bottom rows.
        let score = score_board(&board);
        assert!(score < 0);
        assert_eq!(score % 10, 0);

        // Isolate the three-run by comparing against the two-piece stack.
        let mut two = Board::new_game();
        for _ in 0..2 {
            two = two.drop_piece(0, Player::Min).unwrap();
        }
        let delta = score - score_board(&two);
        // Adding the third piece completes one 3+1 vertical window, turns
        // one 2+2 vertical window into a 3-piece window, and upgrades the
        // row-2 horizontal and diagonal windows it joins.
        assert!(delta <= -THREE_RUN_SCORE);
    }

    #[test]
    fn completed_vertical_run_scores_win() {
        let mut board = Board::new_game();
        for _ in 0..4 {
            board = board.drop_piece(2, Player::Max).unwrap();
        }
        let score = score_board(&board);
        assert!(score >= WIN_SCORE);
        assert!(score < 2 * WIN_SCORE);
    }

    #[test]
    fn score_ignores_side_to_move() {
        let mut board = Board::new_game().drop_piece(1, Player::Max).unwrap();
        let score_after_max = score_board(&board);
        board.turn = Player::Max;
        assert_eq!(score_board(&board), score_after_max);
    }

    #[test]
    fn mixed_windows_score_zero() {
        // A 4x4 board with a single alternating bottom row: every window is
        // mixed or nearly empty, and there is no center stack.
        let config = BoardConfig {
            rows: 4,
            cols: 4,
            connect: 4,
        };
        let board = Board::new_empty(config);
        let board = board.drop_piece(0, Player::Max).unwrap();
        let board = board.drop_piece(1, Player::Min).unwrap();
        let board = board.drop_piece(2, Player::Max).unwrap();
        let board = board.drop_piece(3, Player::Min).unwrap();
        // Bottom row window is 2 Max + 2 Min: zero. Columns hold one piece
        // each. The center column (index 2) holds one Max piece.
        assert_eq!(score_board(&board), CENTER_CELL_SCORE);
    }

    #[test]
    fn reduce_keeps_first_score_on_ties() {
        assert_eq!(reduce_scores(&[5, 9, 9, 2], EvalMode::Maximize).unwrap(), 9);
        assert_eq!(reduce_scores(&[5, 2, 2, 7], EvalMode::Minimize).unwrap(), 2);
        // All-equal batches reduce to the shared value regardless of mode.
        assert_eq!(reduce_scores(&[4, 4, 4], EvalMode::Maximize).unwrap(), 4);
        assert_eq!(reduce_scores(&[4, 4, 4], EvalMode::Minimize).unwrap(), 4);
    }

    #[test]
    fn reduce_rejects_empty_batches() {
        assert!(matches!(
            reduce_scores(&[], EvalMode::Maximize),
            Err(GameErrors::EmptyBatch)
        ));
    }

    #[test]
    fn sentinel_is_worst_case_for_the_requester() {
        assert_eq!(sentinel_score(EvalMode::Maximize), MIN_SCORE);
        assert_eq!(sentinel_score(EvalMode::Minimize), MAX_SCORE);
    }
}

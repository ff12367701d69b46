//! Difficulty-2 greedy engine.
//!
//! Looks exactly one ply ahead: each open column is probed, the resulting
//! board is scored with the static heuristic, and the best immediate value
//! for the side to move wins. No search, no batching.

use crate::board::board_state::Board;
use crate::board::board_types::Player;
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::scoring::score_board;

pub struct GreedyEngine;

impl GreedyEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GreedyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for GreedyEngine {
    fn name(&self) -> &str {
        "FigFour Greedy"
    }

    fn choose_column(
        &mut self,
        board: &Board,
        _params: &GoParams,
    ) -> Result<EngineOutput, String> {
        let legal = board.legal_columns();

        let mut out = EngineOutput::default();
        out.info_lines
            .push(format!("info string greedy_engine open_columns {}", legal.len()));

        let mover = board.turn;
        let maximizing = mover == Player::Max;

        let mut best: Option<(usize, i32)> = None;
        for col in legal {
            let child = board
                .drop_piece(col, mover)
                .map_err(|e| format!("{e:?}"))?;
            let value = score_board(&child);
            let improves = match best {
                None => true,
                Some((_, current)) => {
                    if maximizing {
                        value > current
                    } else {
                        value < current
                    }
                }
            };
            if improves {
                best = Some((col, value));
            }
        }

        if let Some((col, value)) = best {
            out.info_lines
                .push(format!("info string greedy_engine value {value}"));
            out.best_column = Some(col);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn takes_an_immediate_win() {
        let mut board = Board::new_game();
        for _ in 0..3 {
            board = board.drop_piece(4, Player::Max).unwrap();
        }
        board.turn = Player::Max;

        let mut engine = GreedyEngine::new();
        let out = engine
            .choose_column(&board, &GoParams::default())
            .unwrap();
        assert_eq!(out.best_column, Some(4));
    }

    #[test]
    fn minimizing_side_prefers_its_own_material() {
        let board = Board::new_game();
        let mut engine = GreedyEngine::new();
        let out = engine
            .choose_column(&board, &GoParams::default())
            .unwrap();
        // Min to move on an empty board: the center drop is the only one
        // with a nonzero (negative, favoring Min) value.
        assert_eq!(out.best_column, Some(3));
    }
}

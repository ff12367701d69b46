//! Difficulty-1 random-move engine.
//!
//! Selects uniformly from open columns and is primarily used for
//! diagnostics, integration testing, and low-strength gameplay.

use rand::prelude::IndexedRandom;

use crate::board::board_state::Board;
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};

pub struct RandomEngine;

impl RandomEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "FigFour Random"
    }

    fn choose_column(
        &mut self,
        board: &Board,
        params: &GoParams,
    ) -> Result<EngineOutput, String> {
        let legal = board.legal_columns();

        let mut out = EngineOutput::default();
        out.info_lines
            .push(format!("info string random_engine open_columns {}", legal.len()));

        if let Some(depth) = params.depth {
            out.info_lines
                .push(format!("info string random_engine requested_depth {depth}"));
        }

        if legal.is_empty() {
            out.best_column = None;
            return Ok(out);
        }

        let mut rng = rand::rng();
        let picked = legal
            .as_slice()
            .choose(&mut rng)
            .ok_or("failed to choose a random column")?;

        out.best_column = Some(*picked);
        Ok(out)
    }
}

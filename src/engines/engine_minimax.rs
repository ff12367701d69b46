//! Difficulty-3 batched minimax engine.
//!
//! Wraps the alpha-beta searcher behind the `Engine` trait. Leaf frontiers
//! are priced either by the local batch evaluator or by the simulated
//! accelerator link, selected per `go` request, with depth defaults that
//! reflect the round-trip cost of each path.

use crate::board::board_state::Board;
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::protocol::state_machine::SimulatedAcceleratorLink;
use crate::search::batch::{LinkBatchEvaluator, LocalBatchEvaluator};
use crate::search::minimax::{
    search_best_column, SearchConfig, DEFAULT_DEPTH_ACCELERATED, DEFAULT_DEPTH_LOCAL,
};

pub struct MinimaxEngine {
    local: LocalBatchEvaluator,
    accelerated: LinkBatchEvaluator<SimulatedAcceleratorLink>,
    depth_override: Option<usize>,
}

impl MinimaxEngine {
    pub fn new() -> Self {
        Self {
            local: LocalBatchEvaluator,
            accelerated: LinkBatchEvaluator::new(SimulatedAcceleratorLink::new()),
            depth_override: None,
        }
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        "FigFour Minimax"
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        if name.eq_ignore_ascii_case("Depth") {
            let depth: usize = value
                .parse()
                .map_err(|_| format!("invalid depth value: {value}"))?;
            self.depth_override = Some(depth);
        }
        Ok(())
    }

    fn choose_column(
        &mut self,
        board: &Board,
        params: &GoParams,
    ) -> Result<EngineOutput, String> {
        let default_depth = if params.use_accelerator {
            DEFAULT_DEPTH_ACCELERATED
        } else {
            DEFAULT_DEPTH_LOCAL
        };
        let depth = params
            .depth
            .or(self.depth_override)
            .unwrap_or(default_depth);
        let config = SearchConfig::with_depth(depth);

        let outcome = if params.use_accelerator {
            search_best_column(board, &mut self.accelerated, &config)
        } else {
            search_best_column(board, &mut self.local, &config)
        }
        .map_err(|e| format!("{e:?}"))?;

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string minimax_engine depth {} accel {} nodes {} batches {} elapsed_ms {} score {}",
            depth,
            params.use_accelerator,
            outcome.nodes,
            outcome.batches,
            outcome.elapsed_ms,
            outcome.best_score,
        ));
        out.best_column = Some(outcome.best_column);
        Ok(out)
    }
}

//! Depth-limited minimax search with alpha-beta pruning and batched leaf
//! evaluation.
//!
//! The walker expands boards in increasing column order, depth first. Leaf
//! scoring is deferred to a `BatchEvaluator`: a parent one ply above the
//! depth limit collects its whole non-terminal child frontier and prices it
//! with a single call, which is what amortizes the fixed cost of an
//! accelerator round-trip. Terminal boards are priced immediately through a
//! singleton batch. The root returns the chosen column explicitly; interior
//! calls return only a score.

use std::time::Instant;

use crate::board::board_state::Board;
use crate::board::board_types::Player;
use crate::errors::GameErrors;
use crate::scoring::{EvalMode, Score, MAX_SCORE, MIN_SCORE};
use crate::search::batch::BatchEvaluator;

/// Default depth limit when leaves are scored on the local CPU.
pub const DEFAULT_DEPTH_LOCAL: usize = 9;
/// Default depth limit when leaves are offloaded to the accelerator. Lower
/// than the local default because each frontier costs a full link
/// round-trip.
pub const DEFAULT_DEPTH_ACCELERATED: usize = 5;

/// Search tuning parameters.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Hard recursion cutoff. Depth 0 prices every root child directly.
    pub max_depth: usize,
    /// Alpha-beta switch. Pruning never changes the root value or column,
    /// only the number of nodes visited, so this exists for verification and
    /// diagnostics.
    pub use_pruning: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_DEPTH_LOCAL,
            use_pruning: true,
        }
    }
}

impl SearchConfig {
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }
}

/// Root search result plus visit counters.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Column chosen at the root.
    pub best_column: usize,
    /// Minimax value of the chosen column.
    pub best_score: Score,
    /// Boards generated during the walk.
    pub nodes: u64,
    /// Evaluator calls issued (singleton and frontier batches alike).
    pub batches: u64,
    pub elapsed_ms: u64,
}

#[derive(Debug, Default)]
struct SearchCounters {
    nodes: u64,
    batches: u64,
}

/// Choose a column for the side to move on `board`.
///
/// The root role is derived from `board.turn` (`Max` maximizes). Each root
/// child is searched with a fresh full window, so the chosen column is
/// identical with pruning on or off. Ties keep the lowest column index.
///
/// Requesting a move on a terminal board is a hard error; every other
/// failure mode an evaluator can hit has already been degraded to a sentinel
/// by the time it reaches the fold.
pub fn search_best_column<E: BatchEvaluator>(
    board: &Board,
    evaluator: &mut E,
    config: &SearchConfig,
) -> Result<SearchOutcome, GameErrors> {
    if board.is_terminal() {
        return Err(GameErrors::GameAlreadyOver);
    }

    let started = Instant::now();
    let mut counters = SearchCounters::default();

    let mover = board.turn;
    let maximizing = mover == Player::Max;
    let root_mode = EvalMode::for_player(mover);

    let mut best_column: Option<usize> = None;
    let mut best_score = 0;

    for col in board.legal_columns() {
        let child = board.drop_piece(col, mover)?;
        counters.nodes += 1;

        // The root prices cutoff-level children one at a time: a frontier
        // batch collapses to a single scalar, which cannot tell the root
        // which sibling produced it.
        let value = if child.is_terminal() || config.max_depth <= 1 {
            counters.batches += 1;
            evaluator.evaluate(std::slice::from_ref(&child), root_mode)?
        } else {
            recurse(
                &child,
                1,
                MIN_SCORE,
                MAX_SCORE,
                evaluator,
                config,
                &mut counters,
            )?
        };

        let improves = match best_column {
            None => true,
            Some(_) => {
                if maximizing {
                    value > best_score
                } else {
                    value < best_score
                }
            }
        };
        if improves {
            best_column = Some(col);
            best_score = value;
        }
    }

    let best_column = best_column.ok_or(GameErrors::NoLegalColumns)?;
    Ok(SearchOutcome {
        best_column,
        best_score,
        nodes: counters.nodes,
        batches: counters.batches,
        elapsed_ms: started.elapsed().as_millis() as u64,
    })
}

/// Interior node. `board` is non-terminal and `depth < config.max_depth`.
///
/// One ply above the cutoff the child frontier is generated in full:
/// terminal children are priced inline (in column order), the rest go into
/// one deferred batch whose scalar stands in for each of them. The fold then
/// walks per-child values in column order with strict comparison, so the
/// tie-break convention is the same on both the batched and unbatched paths.
fn recurse<E: BatchEvaluator>(
    board: &Board,
    depth: usize,
    mut alpha: Score,
    mut beta: Score,
    evaluator: &mut E,
    config: &SearchConfig,
    counters: &mut SearchCounters,
) -> Result<Score, GameErrors> {
    let mover = board.turn;
    let maximizing = mover == Player::Max;
    let node_mode = EvalMode::for_player(mover);
    let at_frontier = depth + 1 == config.max_depth;

    if at_frontier {
        // Generate the whole frontier first. Terminal children are priced
        // immediately through singleton batches; the rest share one call.
        let mut values: Vec<Option<Score>> = Vec::new();
        let mut deferred: Vec<Board> = Vec::new();

        for col in board.legal_columns() {
            let child = board.drop_piece(col, mover)?;
            counters.nodes += 1;
            if child.is_terminal() {
                counters.batches += 1;
                let value =
                    evaluator.evaluate(std::slice::from_ref(&child), node_mode)?;
                values.push(Some(value));
            } else {
                deferred.push(child);
                values.push(None);
            }
        }

        if !deferred.is_empty() {
            counters.batches += 1;
            let shared = evaluator.evaluate(&deferred, node_mode)?;
            for value in values.iter_mut() {
                if value.is_none() {
                    *value = Some(shared);
                }
            }
        }

        let mut best: Option<Score> = None;
        for value in values {
            let value = value.expect("frontier child left unpriced");
            let improves = match best {
                None => true,
                Some(current) => {
                    if maximizing {
                        value > current
                    } else {
                        value < current
                    }
                }
            };
            if improves {
                best = Some(value);
            }
            if config.use_pruning {
                let current = best.expect("fold visited at least one child");
                if maximizing {
                    if current > alpha {
                        alpha = current;
                    }
                    if alpha >= beta {
                        break;
                    }
                } else {
                    if current < beta {
                        beta = current;
                    }
                    if beta <= alpha {
                        break;
                    }
                }
            }
        }
        return best.ok_or(GameErrors::NoLegalColumns);
    }

    // Ordinary interior node: fold children as they are produced.
    let mut best: Option<Score> = None;
    for col in board.legal_columns() {
        let child = board.drop_piece(col, mover)?;
        counters.nodes += 1;

        let value = if child.is_terminal() {
            counters.batches += 1;
            evaluator.evaluate(std::slice::from_ref(&child), node_mode)?
        } else {
            recurse(&child, depth + 1, alpha, beta, evaluator, config, counters)?
        };

        let improves = match best {
            None => true,
            Some(current) => {
                if maximizing {
                    value > current
                } else {
                    value < current
                }
            }
        };
        if improves {
            best = Some(value);
        }

        if config.use_pruning {
            let current = best.expect("fold visited at least one child");
            if maximizing {
                if current > alpha {
                    alpha = current;
                }
                if alpha >= beta {
                    break;
                }
            } else {
                if current < beta {
                    beta = current;
                }
                if beta <= alpha {
                    break;
                }
            }
        }
    }

    best.ok_or(GameErrors::NoLegalColumns)
}

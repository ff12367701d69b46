//! Batch evaluation layer.
//!
//! Search defers leaf scoring to a `BatchEvaluator` so a whole sibling
//! frontier can be priced in one call. Two implementations are provided: a
//! local one that scores each board on the CPU and reduces, and a link-backed
//! one that round-trips the batch through the accelerator wire protocol.
//! Generation stays separate from evaluation; evaluators consume `&[Board]`
//! and produce exactly one scalar.

use std::time::Duration;

use crate::board::board_state::Board;
use crate::errors::GameErrors;
use crate::protocol::accelerator_link::{AcceleratorLink, DEFAULT_LINK_TIMEOUT};
use crate::protocol::packet::{encode_request, parse_response};
use crate::scoring::{reduce_scores, score_board, sentinel_score, EvalMode, Score};

/// Slot capacity of one accelerator request.
pub const MAX_BATCH_BOARDS: usize = 7;

/// Reduces an ordered group of sibling boards to one scalar score.
///
/// Contract: at least one board per call (`EmptyBatch` otherwise); the
/// returned value is the fold of the per-board heuristic scores in `mode`
/// direction, with ties keeping the earliest board. Implementations must be
/// deterministic for a given input.
pub trait BatchEvaluator {
    fn evaluate(&mut self, boards: &[Board], mode: EvalMode) -> Result<Score, GameErrors>;
}

/// CPU-side batch evaluator.
///
/// Scores every board with the static heuristic and folds the results with
/// the canonical reduction.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalBatchEvaluator;

impl BatchEvaluator for LocalBatchEvaluator {
    fn evaluate(&mut self, boards: &[Board], mode: EvalMode) -> Result<Score, GameErrors> {
        if boards.is_empty() {
            return Err(GameErrors::EmptyBatch);
        }
        let scores: Vec<Score> = boards.iter().map(score_board).collect();
        reduce_scores(&scores, mode)
    }
}

/// Batch evaluator that delegates to an accelerator over a link.
///
/// Encodes the batch into a request packet, performs one blocking
/// transaction, and parses the framed response. A timeout or a malformed
/// response degrades to the mode's sentinel score so the search continues
/// with that one branch treated as maximally unfavorable. Precondition
/// violations (empty batch, too many boards, non-standard board shape) are
/// propagated as hard errors instead.
pub struct LinkBatchEvaluator<L: AcceleratorLink> {
    link: L,
    timeout: Duration,
}

impl<L: AcceleratorLink> LinkBatchEvaluator<L> {
    pub fn new(link: L) -> Self {
        Self {
            link,
            timeout: DEFAULT_LINK_TIMEOUT,
        }
    }

    pub fn with_timeout(link: L, timeout: Duration) -> Self {
        Self { link, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<L: AcceleratorLink> BatchEvaluator for LinkBatchEvaluator<L> {
    fn evaluate(&mut self, boards: &[Board], mode: EvalMode) -> Result<Score, GameErrors> {
        let packet = encode_request(boards, mode)?;

        let raw = match self.link.transact(&packet, self.timeout) {
            Ok(raw) => raw,
            Err(_) => return Ok(sentinel_score(mode)),
        };

        match parse_response(&raw) {
            Ok(score) => Ok(score),
            Err(_) => Ok(sentinel_score(mode)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::board::board_types::Player;
    use crate::protocol::packet::PACKET_BYTES;
    use crate::protocol::state_machine::SimulatedAcceleratorLink;
    use crate::scoring::{MAX_SCORE, MIN_SCORE};

    struct DeadLink;

    impl AcceleratorLink for DeadLink {
        fn transact(
            &mut self,
            _packet: &[u8; PACKET_BYTES],
            _timeout: Duration,
        ) -> Result<Vec<u8>, GameErrors> {
            Err(GameErrors::LinkTimeout)
        }
    }

    struct TruncatingLink;

    impl AcceleratorLink for TruncatingLink {
        fn transact(
            &mut self,
            _packet: &[u8; PACKET_BYTES],
            _timeout: Duration,
        ) -> Result<Vec<u8>, GameErrors> {
            Ok(vec![0x00, 0x01])
        }
    }

    fn sibling_batch() -> Vec<Board> {
        let parent = Board::new_game().drop_piece(2, Player::Min).unwrap();
        parent
            .legal_columns()
            .into_iter()
            .map(|col| parent.drop_piece(col, Player::Max).unwrap())
            .collect()
    }

    #[test]
    fn local_evaluator_folds_with_mode_direction() {
        let boards = sibling_batch();
        let mut local = LocalBatchEvaluator;
        let scores: Vec<Score> = boards.iter().map(score_board).collect();

        let max = local.evaluate(&boards, EvalMode::Maximize).unwrap();
        let min = local.evaluate(&boards, EvalMode::Minimize).unwrap();
        assert_eq!(max, *scores.iter().max().unwrap());
        assert_eq!(min, *scores.iter().min().unwrap());
    }

    #[test]
    fn local_evaluator_rejects_empty_batches() {
        let mut local = LocalBatchEvaluator;
        assert!(matches!(
            local.evaluate(&[], EvalMode::Maximize),
            Err(GameErrors::EmptyBatch)
        ));
    }

    #[test]
    fn link_evaluator_agrees_with_local_evaluation() {
        let boards = sibling_batch();
        let mut local = LocalBatchEvaluator;
        let mut linked = LinkBatchEvaluator::new(SimulatedAcceleratorLink::new());

        for mode in [EvalMode::Maximize, EvalMode::Minimize] {
            assert_eq!(
                linked.evaluate(&boards, mode).unwrap(),
                local.evaluate(&boards, mode).unwrap()
            );
        }
    }

    #[test]
    fn dead_link_degrades_to_sentinel() {
        let boards = sibling_batch();
        let mut linked = LinkBatchEvaluator::new(DeadLink);
        assert_eq!(
            linked.evaluate(&boards, EvalMode::Maximize).unwrap(),
            MIN_SCORE
        );
        assert_eq!(
            linked.evaluate(&boards, EvalMode::Minimize).unwrap(),
            MAX_SCORE
        );
    }

    #[test]
    fn truncated_response_degrades_to_sentinel() {
        let boards = sibling_batch();
        let mut linked = LinkBatchEvaluator::new(TruncatingLink);
        assert_eq!(
            linked.evaluate(&boards, EvalMode::Maximize).unwrap(),
            MIN_SCORE
        );
    }

    #[test]
    fn link_evaluator_propagates_batch_preconditions() {
        let mut linked = LinkBatchEvaluator::new(DeadLink);
        assert!(matches!(
            linked.evaluate(&[], EvalMode::Maximize),
            Err(GameErrors::EmptyBatch)
        ));

        let board = Board::new_game();
        let oversized: Vec<Board> = (0..8).map(|_| board.clone()).collect();
        assert!(matches!(
            linked.evaluate(&oversized, EvalMode::Maximize),
            Err(GameErrors::BatchTooLarge(8))
        ));
    }
}

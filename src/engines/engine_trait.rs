//! Engine abstraction layer used by the console subsystem.
//!
//! Defines common input parameters and output payloads so different engine
//! strategies can be selected at runtime behind a single trait interface.

use crate::board::board_state::Board;

#[derive(Debug, Clone, Default)]
pub struct GoParams {
    /// Search depth override; engines fall back to their own default.
    pub depth: Option<usize>,
    /// Route leaf evaluation through the accelerator link.
    pub use_accelerator: bool,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    /// Chosen column, or `None` when the position offers no move.
    pub best_column: Option<usize>,
    /// Diagnostic lines for the front-end to print verbatim.
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, _name: &str, _value: &str) -> Result<(), String> {
        Ok(())
    }

    /// Pick a column for the side to move on `board`.
    fn choose_column(&mut self, board: &Board, params: &GoParams)
        -> Result<EngineOutput, String>;
}

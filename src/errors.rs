//! Errors used throughout the Fig Four engine.
//!
//! This module defines the canonical error type returned by board logic,
//! batch evaluation, the accelerator wire protocol and notation parsing. The
//! enum `GameErrors` is used as the single error type across the crate to
//! simplify propagation and matching. Each variant carries contextual
//! information where appropriate to aid diagnostics and user-facing error
//! messages.
//!
//! Usage guidelines:
//! - Functions in the engine should return `Result<..., GameErrors>` for
//!   recoverable or expected failure modes (full columns, malformed input,
//!   link failures, etc).
//! - `ColumnFull` is an expected outcome of probing a move, not a fault; the
//!   move-generation helpers skip full columns instead of raising it.
//! - `LinkTimeout` and `MalformedResponse` are recovered inside the batch
//!   evaluator by substituting a sentinel score, so a flaky accelerator
//!   degrades one branch of the search instead of aborting it.
//! - `GameAlreadyOver` and `EmptyBatch` indicate caller bugs and are the only
//!   variants surfaced as hard failures by the search entry point.

/// Unified error type for the Fig Four engine.
///
/// Each variant corresponds to a specific, identifiable failure mode that can
/// occur while manipulating the board, batching boards for evaluation,
/// driving the accelerator link, or parsing position notation. Variants
/// include contextual payloads where useful (for example the offending column
/// index or byte value) so that callers can log or display precise
/// diagnostics.
#[derive(Debug)]
pub enum GameErrors {
    /// Attempted to read a cell outside the configured board dimensions.
    ///
    /// Payload: (row, column) of the attempted access.
    OutOfBounds(usize, usize),

    /// A column index at or beyond the configured column count was supplied.
    ColumnOutOfRange(usize),

    /// Attempted to drop a piece into a column with no empty cell.
    ///
    /// This is an expected, recoverable condition; callers probing moves
    /// should treat it as "skip this column".
    ColumnFull(usize),

    /// A move was requested but the board has no open column.
    NoLegalColumns,

    /// A move was requested on a board that already has a winner or is full.
    GameAlreadyOver,

    /// A batch evaluator was handed zero boards. The batch contract requires
    /// at least one board, so this is a precondition violation rather than a
    /// case with a default score.
    EmptyBatch,

    /// A batch exceeded the accelerator's slot capacity.
    ///
    /// Payload: the offending batch length.
    BatchTooLarge(usize),

    /// A board with a shape other than the wire format's fixed 6x7 grid was
    /// handed to the packet codec.
    ///
    /// Payload: (rows, cols) of the offending board.
    BoardShapeUnsupported(usize, usize),

    /// A 2-bit cell field in a request packet held the unassigned code.
    InvalidCellCode(u8),

    /// The mode byte of a request packet was neither 0 nor 1.
    InvalidModeByte(u8),

    /// The count byte of a request packet was outside 1..=7.
    InvalidBatchCount(u8),

    /// The accelerator did not produce a response within the configured
    /// timeout.
    LinkTimeout,

    /// A link response was too short to contain the framed 33-bit score.
    ///
    /// Payload: the number of bytes actually received.
    MalformedResponse(usize),

    /// The accelerator state machine was driven out of its legal sequence
    /// (for example clocking response bits before a request completed).
    ///
    /// Payload: a short description of the violated step.
    LinkOutOfSequence(&'static str),

    /// A single character in a position notation string was invalid.
    InvalidNotationChar(char),

    /// A position notation string (multi-character) failed to parse.
    ///
    /// Payload: a short description of the structural problem.
    InvalidNotationString(String),

    /// A parsed position violated gravity: an occupied cell sat above an
    /// empty cell in the same column.
    ///
    /// Payload: (row, column) of the floating piece.
    FloatingPiece(usize, usize),
}

//! Abstract transport to the evaluation accelerator.
//!
//! The engine only ever needs "send a packet, receive the raw response
//! stream, or time out". Clock generation, pin-level signaling, and device
//! discovery belong to whatever implements this trait; the core never
//! inspects transport-level signal names.

use std::time::Duration;

use crate::errors::GameErrors;
use crate::protocol::packet::PACKET_BYTES;

/// Default transaction timeout.
pub const DEFAULT_LINK_TIMEOUT: Duration = Duration::from_secs(5);

/// Blocking, single-transaction accelerator transport.
///
/// Contract:
/// - One outstanding transaction at a time; no pipelining. A link handle is
///   exclusively owned for the duration of `transact`, and the crate adds no
///   internal locking; multithreaded hosts must serialize access
///   externally.
/// - `transact` writes the full 79-byte request, waits up to `timeout` for
///   the peer to signal readiness, clocks out the 33-bit response stream,
///   and returns it packed into raw bytes (nominally 5, framing bit first).
/// - A peer that never becomes ready is reported as `LinkTimeout`; a stream
///   shorter than the framed score is reported as `MalformedResponse`. The
///   batch evaluator maps both to a sentinel score.
pub trait AcceleratorLink {
    fn transact(
        &mut self,
        packet: &[u8; PACKET_BYTES],
        timeout: Duration,
    ) -> Result<Vec<u8>, GameErrors>;
}

//! Deterministic accelerator-side protocol peer.
//!
//! The accelerator behaves as a clocked state machine: it frames a
//! request in bit by bit, latches it into mode/count/boards, enables one
//! evaluator per populated slot, waits for every enabled evaluator to report
//! a stable score, reduces to a single scalar, and streams the framed result
//! back out. This module implements that contract as an ordinary synchronous
//! object so the same peer can back tests, the simulated link, or a golden
//! model for hardware bring-up. Only input/output behavior is modeled; there
//! are no clock-edge semantics.

use std::time::Duration;

use crate::board::board_state::Board;
use crate::errors::GameErrors;
use crate::protocol::accelerator_link::AcceleratorLink;
use crate::protocol::packet::{
    decode_request, encode_response, PACKET_BYTES, RESPONSE_BITS, RESPONSE_BYTES, SLOT_COUNT,
};
use crate::scoring::{reduce_scores, score_board, EvalMode, Score};

/// Bits in one request frame.
pub const REQUEST_BITS: usize = PACKET_BYTES * 8;

/// Observable protocol states, in transition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceleratorState {
    Idle,
    Receive,
    Latch,
    Enable,
    AwaitAll,
    Reduce,
    Send,
    Done,
}

/// One of the seven per-board evaluator sub-machines.
///
/// A slot owns its board exclusively for the duration of a transaction. A
/// slot that is not enabled contributes nothing to the reduction.
#[derive(Debug, Clone, Default)]
struct SlotEvaluator {
    enabled: bool,
    board: Option<Board>,
    score: Option<Score>,
}

impl SlotEvaluator {
    fn clear(&mut self) {
        self.enabled = false;
        self.board = None;
        self.score = None;
    }

    /// Run the slot's evaluator to completion. The score is stable once set.
    fn run(&mut self) {
        if let (true, Some(board), None) = (self.enabled, self.board.as_ref(), self.score) {
            self.score = Some(score_board(board));
        }
    }
}

/// Software model of the accelerator protocol peer.
///
/// Drive it with `begin_request` + `clock_in_bit` for the request frame,
/// `step` through the internal states, and `clock_out_bit` for the response
/// frame; or use `transact_bytes` to run a whole transaction through the
/// same bit-serial path.
#[derive(Debug)]
pub struct AcceleratorStateMachine {
    state: AcceleratorState,
    request: [u8; PACKET_BYTES],
    bits_received: usize,
    mode: EvalMode,
    enabled_count: usize,
    slots: [SlotEvaluator; SLOT_COUNT],
    response: [u8; RESPONSE_BYTES],
    bits_sent: usize,
}

impl Default for AcceleratorStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl AcceleratorStateMachine {
    pub fn new() -> Self {
        Self {
            state: AcceleratorState::Idle,
            request: [0; PACKET_BYTES],
            bits_received: 0,
            mode: EvalMode::Minimize,
            enabled_count: 0,
            slots: std::array::from_fn(|_| SlotEvaluator::default()),
            response: [0; RESPONSE_BYTES],
            bits_sent: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> AcceleratorState {
        self.state
    }

    /// Hard reset back to `Idle`, dropping any transaction in flight.
    pub fn reset(&mut self) {
        self.state = AcceleratorState::Idle;
        self.request = [0; PACKET_BYTES];
        self.bits_received = 0;
        self.enabled_count = 0;
        for slot in self.slots.iter_mut() {
            slot.clear();
        }
        self.response = [0; RESPONSE_BYTES];
        self.bits_sent = 0;
    }

    /// Assert the request phase: `Idle -> Receive`.
    pub fn begin_request(&mut self) -> Result<(), GameErrors> {
        if self.state != AcceleratorState::Idle {
            return Err(GameErrors::LinkOutOfSequence(
                "request asserted while a transaction was in flight",
            ));
        }
        self.reset();
        self.state = AcceleratorState::Receive;
        Ok(())
    }

    /// Shift one request bit in, MSB of byte 0 first. The 632nd bit moves
    /// the machine to `Latch`.
    pub fn clock_in_bit(&mut self, bit: bool) -> Result<(), GameErrors> {
        if self.state != AcceleratorState::Receive {
            return Err(GameErrors::LinkOutOfSequence(
                "request bit clocked outside the receive state",
            ));
        }
        if bit {
            self.request[self.bits_received / 8] |= 1 << (7 - self.bits_received % 8);
        }
        self.bits_received += 1;
        if self.bits_received == REQUEST_BITS {
            self.state = AcceleratorState::Latch;
        }
        Ok(())
    }

    /// Advance one internal state. `Send` and `Idle` advance through the
    /// clock methods instead.
    pub fn step(&mut self) -> Result<AcceleratorState, GameErrors> {
        match self.state {
            AcceleratorState::Latch => {
                let (mode, count, boards) = decode_request(&self.request)?;
                self.mode = mode;
                self.enabled_count = count;
                let first_slot = SLOT_COUNT - count;
                for (offset, board) in boards.into_iter().enumerate() {
                    self.slots[first_slot + offset].board = Some(board);
                }
                self.state = AcceleratorState::Enable;
            }
            AcceleratorState::Enable => {
                let first_slot = SLOT_COUNT - self.enabled_count;
                for slot in self.slots[first_slot..].iter_mut() {
                    slot.enabled = true;
                }
                self.state = AcceleratorState::AwaitAll;
            }
            AcceleratorState::AwaitAll => {
                // One pending evaluator finishes per step; the machine waits
                // here until every enabled slot has reported.
                if let Some(slot) = self
                    .slots
                    .iter_mut()
                    .find(|s| s.enabled && s.score.is_none())
                {
                    slot.run();
                }
                if self
                    .slots
                    .iter()
                    .all(|s| !s.enabled || s.score.is_some())
                {
                    self.state = AcceleratorState::Reduce;
                }
            }
            AcceleratorState::Reduce => {
                // Enabled slot order is batch order, so the canonical fold's
                // first-wins tie-break keeps the lowest-indexed slot.
                let scores: Vec<Score> = self
                    .slots
                    .iter()
                    .filter(|s| s.enabled)
                    .map(|s| s.score.expect("enabled slot reported before reduce"))
                    .collect();
                let result = reduce_scores(&scores, self.mode)?;
                self.response = encode_response(result);
                self.bits_sent = 0;
                self.state = AcceleratorState::Send;
            }
            AcceleratorState::Done => {
                self.reset();
            }
            AcceleratorState::Idle | AcceleratorState::Receive | AcceleratorState::Send => {
                return Err(GameErrors::LinkOutOfSequence(
                    "step taken in an externally clocked state",
                ));
            }
        }
        Ok(self.state)
    }

    /// Shift one response bit out, framing bit first. The 33rd bit moves the
    /// machine to `Done`.
    pub fn clock_out_bit(&mut self) -> Result<bool, GameErrors> {
        if self.state != AcceleratorState::Send {
            return Err(GameErrors::LinkOutOfSequence(
                "response bit clocked outside the send state",
            ));
        }
        let bit = (self.response[self.bits_sent / 8] >> (7 - self.bits_sent % 8)) & 1 == 1;
        self.bits_sent += 1;
        if self.bits_sent == RESPONSE_BITS {
            self.state = AcceleratorState::Done;
        }
        Ok(bit)
    }

    /// Run one full transaction through the bit-serial path and return the
    /// raw response stream.
    pub fn transact_bytes(
        &mut self,
        packet: &[u8; PACKET_BYTES],
    ) -> Result<[u8; RESPONSE_BYTES], GameErrors> {
        self.begin_request()?;
        for bit_index in 0..REQUEST_BITS {
            let bit = (packet[bit_index / 8] >> (7 - bit_index % 8)) & 1 == 1;
            self.clock_in_bit(bit)?;
        }

        while self.state != AcceleratorState::Send {
            self.step()?;
        }

        let mut raw = [0u8; RESPONSE_BYTES];
        for bit_index in 0..RESPONSE_BITS {
            if self.clock_out_bit()? {
                raw[bit_index / 8] |= 1 << (7 - bit_index % 8);
            }
        }

        // Done -> Idle, ready for the next transaction.
        self.step()?;
        Ok(raw)
    }
}

/// In-process accelerator: an `AcceleratorLink` backed by the state machine.
///
/// This is the software rendition of the hardware peer. It never times out;
/// the timeout parameter only bounds real transports.
#[derive(Debug, Default)]
pub struct SimulatedAcceleratorLink {
    machine: AcceleratorStateMachine,
}

impl SimulatedAcceleratorLink {
    pub fn new() -> Self {
        Self {
            machine: AcceleratorStateMachine::new(),
        }
    }
}

impl AcceleratorLink for SimulatedAcceleratorLink {
    fn transact(
        &mut self,
        packet: &[u8; PACKET_BYTES],
        _timeout: Duration,
    ) -> Result<Vec<u8>, GameErrors> {
        Ok(self.machine.transact_bytes(packet)?.to_vec())
    }
}

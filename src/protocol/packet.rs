//! Request/response packet codec for the accelerator link.
//!
//! A request is a fixed 79-byte record: one mode byte, one count byte, and
//! seven 11-byte board slots. Each slot carries 4 reserved zero bits followed
//! by 42 cells at 2 bits apiece, row-major from the top row, most
//! significant bit first. Real boards occupy the trailing `count` slots;
//! unused leading slots stay zero. A response is 33 transmitted bits: one
//! framing bit (discarded) and then a signed 32-bit score, big-endian.

use crate::board::board_state::Board;
use crate::board::board_types::{BoardConfig, Cell, Player};
use crate::errors::GameErrors;
use crate::scoring::{EvalMode, Score};

/// Fixed request size: mode + count + 7 slots of 11 bytes.
pub const PACKET_BYTES: usize = 2 + SLOT_COUNT * SLOT_BYTES;
/// Board slots per request.
pub const SLOT_COUNT: usize = 7;
/// Bytes per board slot (4 reserved bits + 42 cells * 2 bits = 88 bits).
pub const SLOT_BYTES: usize = 11;
/// Reserved zero bits at the head of each slot.
pub const SLOT_RESERVED_BITS: usize = 4;
/// Bits in a response stream: one framing bit plus the 32-bit score.
pub const RESPONSE_BITS: usize = 33;
/// Raw bytes needed to carry a response stream.
pub const RESPONSE_BYTES: usize = 5;

const CELL_CODE_EMPTY: u8 = 0b00;
const CELL_CODE_MAX: u8 = 0b01;
const CELL_CODE_MIN: u8 = 0b10;

#[inline]
fn cell_code(cell: Cell) -> u8 {
    match cell {
        Cell::Empty => CELL_CODE_EMPTY,
        Cell::Max => CELL_CODE_MAX,
        Cell::Min => CELL_CODE_MIN,
    }
}

#[inline]
fn cell_from_code(code: u8) -> Result<Cell, GameErrors> {
    match code {
        CELL_CODE_EMPTY => Ok(Cell::Empty),
        CELL_CODE_MAX => Ok(Cell::Max),
        CELL_CODE_MIN => Ok(Cell::Min),
        other => Err(GameErrors::InvalidCellCode(other)),
    }
}

#[inline]
fn set_bit(buf: &mut [u8], bit: usize, on: bool) {
    if on {
        buf[bit / 8] |= 1 << (7 - bit % 8);
    }
}

#[inline]
fn get_bit(buf: &[u8], bit: usize) -> bool {
    (buf[bit / 8] >> (7 - bit % 8)) & 1 == 1
}

/// Encode a batch of boards and a mode into one request packet.
///
/// Boards are right-aligned: a batch of length `c` fills slots
/// `7 - c ..= 6` in order, and the leading slots are left zeroed. Only the
/// standard 6x7 shape has a wire representation.
pub fn encode_request(
    boards: &[Board],
    mode: EvalMode,
) -> Result<[u8; PACKET_BYTES], GameErrors> {
    if boards.is_empty() {
        return Err(GameErrors::EmptyBatch);
    }
    if boards.len() > SLOT_COUNT {
        return Err(GameErrors::BatchTooLarge(boards.len()));
    }
    for board in boards {
        if !board.config.is_standard_shape() {
            return Err(GameErrors::BoardShapeUnsupported(
                board.config.rows,
                board.config.cols,
            ));
        }
    }

    let mut packet = [0u8; PACKET_BYTES];
    packet[0] = mode.mode_byte();
    packet[1] = boards.len() as u8;

    let first_slot = SLOT_COUNT - boards.len();
    for (offset, board) in boards.iter().enumerate() {
        let slot = first_slot + offset;
        let slot_bytes = &mut packet[2 + slot * SLOT_BYTES..2 + (slot + 1) * SLOT_BYTES];
        let mut bit = SLOT_RESERVED_BITS;
        for row in 0..board.config.rows {
            for col in 0..board.config.cols {
                let code = cell_code(board.cell_unchecked(row, col));
                set_bit(slot_bytes, bit, code & 0b10 != 0);
                set_bit(slot_bytes, bit + 1, code & 0b01 != 0);
                bit += 2;
            }
        }
    }

    Ok(packet)
}

/// Decode a request packet back into `(mode, count, boards)`.
///
/// Exact inverse of `encode_request` for well-formed batches. The wire
/// format does not carry the side to move; it is reconstructed from the
/// piece counts (`Min` opens, so equal counts mean `Min` is on move), which
/// holds for every board reachable by legal play.
pub fn decode_request(
    packet: &[u8; PACKET_BYTES],
) -> Result<(EvalMode, usize, Vec<Board>), GameErrors> {
    let mode = EvalMode::from_mode_byte(packet[0])?;
    let count = packet[1];
    if count == 0 || count as usize > SLOT_COUNT {
        return Err(GameErrors::InvalidBatchCount(count));
    }
    let count = count as usize;

    let config = BoardConfig::default();
    let mut boards = Vec::with_capacity(count);
    let first_slot = SLOT_COUNT - count;
    for slot in first_slot..SLOT_COUNT {
        let slot_bytes = &packet[2 + slot * SLOT_BYTES..2 + (slot + 1) * SLOT_BYTES];
        let mut board = Board::new_empty(config);
        let mut bit = SLOT_RESERVED_BITS;
        let mut max_pieces = 0usize;
        let mut min_pieces = 0usize;
        for row in 0..config.rows {
            for col in 0..config.cols {
                let code = (get_bit(slot_bytes, bit) as u8) << 1
                    | get_bit(slot_bytes, bit + 1) as u8;
                bit += 2;
                let cell = cell_from_code(code)?;
                match cell {
                    Cell::Max => max_pieces += 1,
                    Cell::Min => min_pieces += 1,
                    Cell::Empty => {}
                }
                board.cells[row * config.cols + col] = cell;
            }
        }
        board.turn = if min_pieces > max_pieces {
            Player::Max
        } else {
            Player::Min
        };
        boards.push(board);
    }

    Ok((mode, count, boards))
}

/// Reassemble the signed score from a raw response stream.
///
/// The input is the clocked-out bit stream packed MSB-first into bytes: one
/// framing bit, then 32 score bits. Dropping the framing bit means shifting
/// the remaining stream left by one position across byte boundaries, after
/// which the four bytes read as a big-endian `i32`.
pub fn parse_response(raw: &[u8]) -> Result<Score, GameErrors> {
    if raw.len() < RESPONSE_BYTES {
        return Err(GameErrors::MalformedResponse(raw.len()));
    }
    let mut value = [0u8; 4];
    for (i, byte) in value.iter_mut().enumerate() {
        *byte = (raw[i] << 1) | (raw[i + 1] >> 7);
    }
    Ok(Score::from_be_bytes(value))
}

/// Pack a score into the raw 33-bit response stream (framing bit clear,
/// then the score MSB-first). Inverse of `parse_response`; the trailing
/// seven bits of the last byte are zero.
pub fn encode_response(score: Score) -> [u8; RESPONSE_BYTES] {
    let be = score.to_be_bytes();
    let mut raw = [0u8; RESPONSE_BYTES];
    raw[0] = be[0] >> 1;
    for i in 1..4 {
        raw[i] = (be[i - 1] << 7) | (be[i] >> 1);
    }
    raw[4] = be[3] << 7;
    raw
}

#[cfg(test)]
mod test {
    use super::*;

    fn played_board(moves: &[usize]) -> Board {
        let mut board = Board::new_game();
        for &col in moves {
            let side = board.turn;
            board = board.drop_piece(col, side).unwrap();
        }
        board
    }

    #[test]
    fn round_trips_batches_of_every_size_and_both_modes() {
        let mut boards = Vec::new();
        for count in 1..=7usize {
            boards.push(played_board(&vec![count - 1; count % 6 + 1]));
            let batch = &boards[..count];
            for mode in [EvalMode::Maximize, EvalMode::Minimize] {
                let packet = encode_request(batch, mode).unwrap();
                let (decoded_mode, decoded_count, decoded) =
                    decode_request(&packet).unwrap();
                assert_eq!(decoded_mode, mode);
                assert_eq!(decoded_count, count);
                assert_eq!(decoded, batch);
            }
        }
    }

    #[test]
    fn packet_layout_matches_the_wire_contract() {
        let board = played_board(&[0]);
        let packet = encode_request(std::slice::from_ref(&board), EvalMode::Maximize).unwrap();

        assert_eq!(packet.len(), 79);
        assert_eq!(packet[0], 1, "maximize mode byte");
        assert_eq!(packet[1], 1, "count byte");

        // A single board lands in the last slot; the six leading slots stay
        // zero-padded.
        assert!(packet[2..2 + 6 * SLOT_BYTES].iter().all(|&b| b == 0));

        // The lone Min piece sits at row 5, col 0, cell index 35. Its 2-bit
        // field starts 4 reserved bits + 70 cell bits into the slot, so bits
        // 74..76: byte 9 of the slot, bits 2 and 3, pattern 10.
        let last_slot = &packet[2 + 6 * SLOT_BYTES..];
        assert_eq!(last_slot[9], 0b0010_0000);
        assert_eq!(last_slot[0] & 0b1111_0000, 0, "reserved bits are zero");
    }

    #[test]
    fn minimize_mode_byte_is_zero() {
        let board = played_board(&[3]);
        let packet = encode_request(std::slice::from_ref(&board), EvalMode::Minimize).unwrap();
        assert_eq!(packet[0], 0);
    }

    #[test]
    fn encode_rejects_bad_batches() {
        assert!(matches!(
            encode_request(&[], EvalMode::Maximize),
            Err(GameErrors::EmptyBatch)
        ));

        let board = Board::new_game();
        let oversized: Vec<Board> = (0..8).map(|_| board.clone()).collect();
        assert!(matches!(
            encode_request(&oversized, EvalMode::Maximize),
            Err(GameErrors::BatchTooLarge(8))
        ));

        let odd_shape = Board::new_empty(crate::board::board_types::BoardConfig {
            rows: 5,
            cols: 5,
            connect: 4,
        });
        assert!(matches!(
            encode_request(std::slice::from_ref(&odd_shape), EvalMode::Maximize),
            Err(GameErrors::BoardShapeUnsupported(5, 5))
        ));
    }

    #[test]
    fn decode_rejects_corrupt_header_fields() {
        let board = played_board(&[2, 3]);
        let mut packet = encode_request(std::slice::from_ref(&board), EvalMode::Maximize).unwrap();

        packet[0] = 9;
        assert!(matches!(
            decode_request(&packet),
            Err(GameErrors::InvalidModeByte(9))
        ));
        packet[0] = 1;

        packet[1] = 0;
        assert!(matches!(
            decode_request(&packet),
            Err(GameErrors::InvalidBatchCount(0))
        ));
        packet[1] = 8;
        assert!(matches!(
            decode_request(&packet),
            Err(GameErrors::InvalidBatchCount(8))
        ));
    }

    #[test]
    fn decode_rejects_the_unassigned_cell_code() {
        let board = played_board(&[2]);
        let mut packet = encode_request(std::slice::from_ref(&board), EvalMode::Maximize).unwrap();
        // Force the first cell of the populated slot to code 11.
        let slot_start = 2 + 6 * SLOT_BYTES;
        packet[slot_start] |= 0b0000_1100;
        assert!(matches!(
            decode_request(&packet),
            Err(GameErrors::InvalidCellCode(0b11))
        ));
    }

    #[test]
    fn response_codec_round_trips_signed_scores() {
        for score in [0, 1, -1, 3, 100_000, -100_110, i32::MAX, i32::MIN] {
            let raw = encode_response(score);
            assert_eq!(parse_response(&raw).unwrap(), score, "score {score}");
            // Framing bit is the stream's first bit and must be clear.
            assert_eq!(raw[0] & 0b1000_0000, 0);
        }
    }

    #[test]
    fn parse_response_shifts_across_byte_boundaries() {
        // Stream: framing bit 0, then 0x0000_0003 MSB-first. The two low
        // bits land split across the last two raw bytes.
        let raw = [0x00, 0x00, 0x00, 0x01, 0b1000_0000];
        assert_eq!(parse_response(&raw).unwrap(), 3);

        // A set framing bit must not leak into the value.
        let framed = [0b1000_0000, 0x00, 0x00, 0x01, 0b1000_0000];
        assert_eq!(parse_response(&framed).unwrap(), 3);
    }

    #[test]
    fn parse_response_rejects_short_reads() {
        assert!(matches!(
            parse_response(&[0x12, 0x34]),
            Err(GameErrors::MalformedResponse(2))
        ));
        assert!(matches!(
            parse_response(&[]),
            Err(GameErrors::MalformedResponse(0))
        ));
    }
}

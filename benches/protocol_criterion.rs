use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};

use fig_four::board::board_state::Board;
use fig_four::board::board_types::Player;
use fig_four::protocol::packet::{decode_request, encode_request, PACKET_BYTES};
use fig_four::protocol::state_machine::AcceleratorStateMachine;
use fig_four::scoring::EvalMode;

fn full_frontier() -> Vec<Board> {
    let parent = Board::new_game().drop_piece(3, Player::Min).unwrap();
    parent
        .legal_columns()
        .into_iter()
        .map(|col| parent.drop_piece(col, Player::Max).unwrap())
        .collect()
}

fn bench_packet_codec(c: &mut Criterion) {
    let boards = full_frontier();
    let packet = encode_request(&boards, EvalMode::Maximize).unwrap();

    let mut group = c.benchmark_group("packet_codec");
    group.throughput(Throughput::Bytes(PACKET_BYTES as u64));

    group.bench_function("encode_7_boards", |b| {
        b.iter(|| black_box(encode_request(black_box(&boards), EvalMode::Maximize).unwrap()))
    });
    group.bench_function("decode_7_boards", |b| {
        b.iter(|| black_box(decode_request(black_box(&packet)).unwrap()))
    });
    group.finish();
}

fn bench_state_machine_transaction(c: &mut Criterion) {
    let boards = full_frontier();
    let packet = encode_request(&boards, EvalMode::Maximize).unwrap();

    let mut group = c.benchmark_group("state_machine");
    group.throughput(Throughput::Bytes(PACKET_BYTES as u64));

    group.bench_function("bit_serial_transaction", |b| {
        let mut machine = AcceleratorStateMachine::new();
        b.iter(|| black_box(machine.transact_bytes(black_box(&packet)).unwrap()))
    });
    group.finish();
}

criterion_group!(benches, bench_packet_codec, bench_state_machine_transaction);
criterion_main!(benches);

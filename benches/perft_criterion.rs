use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use plum_rules::game_state::chess_rules::STARTING_POSITION_FEN;
use plum_rules::game_state::position::Position;
use plum_rules::move_generation::perft::{perft, perft_divide, PerftCounts};

/// Reference leaf counts that the move generator must reproduce.
struct Expected {
    nodes: usize,
    captures: usize,
    en_passant: usize,
    castles: usize,
}

struct PerftCase {
    label: &'static str,
    fen: &'static str,
    depth: u8,
    expected: Expected,
}

const CASES: &[PerftCase] = &[
    PerftCase {
        label: "opening",
        fen: STARTING_POSITION_FEN,
        depth: 3,
        expected: Expected {
            nodes: 8902,
            captures: 34,
            en_passant: 0,
            castles: 0,
        },
    },
    PerftCase {
        label: "kiwipete_castling",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        depth: 2,
        expected: Expected {
            nodes: 2039,
            captures: 351,
            en_passant: 1,
            castles: 91,
        },
    },
    PerftCase {
        label: "en_passant_pin",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        depth: 4,
        expected: Expected {
            nodes: 43_238,
            captures: 3348,
            en_passant: 123,
            castles: 0,
        },
    },
];

fn check_breakdown(case: &PerftCase, counts: &PerftCounts) {
    let expected = &case.expected;
    assert_eq!(
        (counts.nodes, counts.captures, counts.en_passant, counts.castles),
        (expected.nodes, expected.captures, expected.en_passant, expected.castles),
        "perft breakdown mismatch for {} at depth {}",
        case.label,
        case.depth
    );
}

fn bench_perft_breakdowns(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft_breakdown");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(5));
    group.sample_size(10);

    for case in CASES {
        let position = Position::from_fen(case.fen).expect("benchmark FEN should parse");

        // Correctness guard before benchmarking.
        check_breakdown(case, &perft(&position, case.depth));

        group.throughput(Throughput::Elements(case.expected.nodes as u64));
        group.bench_with_input(
            BenchmarkId::new(case.label, case.depth),
            &position,
            |b, position| {
                b.iter(|| black_box(perft(black_box(position), case.depth)));
            },
        );
    }

    group.finish();
}

/// Root split of the en-passant pin position, one subtree count per root move.
fn bench_divide(c: &mut Criterion) {
    let case = &CASES[2];
    let position = Position::from_fen(case.fen).expect("benchmark FEN should parse");
    let depth = case.depth - 1;

    let divided = perft_divide(&position, depth);
    let summed: usize = divided.iter().map(|(_, counts)| counts.nodes).sum();
    assert_eq!(divided.len(), 14, "root move count for {}", case.label);
    assert_eq!(summed, 2812, "divide total for {} at depth {depth}", case.label);

    let mut group = c.benchmark_group("perft_divide");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(3));
    group.sample_size(20);
    group.throughput(Throughput::Elements(summed as u64));
    group.bench_function(format!("{}_d{depth}", case.label), |b| {
        b.iter(|| black_box(perft_divide(black_box(&position), depth)));
    });
    group.finish();
}

criterion_group!(perft_benches, bench_perft_breakdowns, bench_divide);
criterion_main!(perft_benches);

use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chessies::game_state::game_state::GameState;
use chessies::move_generation::legal_move_generator::{legal_moves, LegalMoveGenerator};
use chessies::move_generation::move_generator::MoveGenerator;
use chessies::move_generation::perft::{perft, perft_multi_threaded};

#[derive(Clone, Copy)]
struct BenchCase {
    name: &'static str,
    fen: &'static str,
    expected_nodes: &'static [u64],
}

const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
const KIWIPETE_FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

const CASES_QUICK: &[BenchCase] = &[
    BenchCase {
        name: "position_1",
        fen: STARTPOS_FEN,
        expected_nodes: &[20, 400, 8902],
    },
    BenchCase {
        name: "position_2",
        fen: KIWIPETE_FEN,
        expected_nodes: &[48, 2039],
    },
    BenchCase {
        name: "position_3",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_nodes: &[14, 191, 2812],
    },
];

const CASES_STANDARD: &[BenchCase] = &[
    BenchCase {
        name: "position_1",
        fen: STARTPOS_FEN,
        expected_nodes: &[20, 400, 8902, 197_281],
    },
    BenchCase {
        name: "position_2",
        fen: KIWIPETE_FEN,
        expected_nodes: &[48, 2039, 97_862],
    },
    BenchCase {
        name: "position_3",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_nodes: &[14, 191, 2812, 43_238],
    },
    BenchCase {
        name: "position_4",
        fen: "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
        expected_nodes: &[6, 264, 9467],
    },
    BenchCase {
        name: "position_5",
        fen: "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        expected_nodes: &[44, 1486, 62_379],
    },
];

fn suite_name() -> &'static str {
    match std::env::var("CHESSIES_BENCH_SUITE") {
        Ok(value) if value.eq_ignore_ascii_case("standard") => "standard",
        _ => "quick",
    }
}

fn selected_cases() -> &'static [BenchCase] {
    match suite_name() {
        "standard" => CASES_STANDARD,
        _ => CASES_QUICK,
    }
}

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group(format!("perft_{}", suite_name()));
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(10);

    for case in selected_cases() {
        let game = GameState::from_fen(case.fen).expect("benchmark FEN should parse");

        for (depth_idx, expected_nodes) in case.expected_nodes.iter().enumerate() {
            let depth = (depth_idx + 1) as u8;

            // Correctness guard before benchmarking.
            let warmup = perft(&LegalMoveGenerator, &game, depth);
            assert_eq!(
                warmup.nodes as u64, *expected_nodes,
                "node mismatch in warmup for {} depth {}",
                case.name, depth
            );

            group.throughput(Throughput::Elements(*expected_nodes));
            let bench_name = format!("{}_d{}", case.name, depth);

            group.bench_with_input(
                BenchmarkId::from_parameter(bench_name),
                expected_nodes,
                |b, expected| {
                    b.iter(|| {
                        let count = perft(&LegalMoveGenerator, black_box(&game), black_box(depth));
                        assert_eq!(count.nodes as u64, *expected);
                        black_box(count.nodes)
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_threaded_perft(c: &mut Criterion) {
    let game = GameState::from_fen(KIWIPETE_FEN).expect("benchmark FEN should parse");
    let generator: Arc<dyn MoveGenerator> = Arc::new(LegalMoveGenerator);
    let depth = 3;
    let expected = perft(&LegalMoveGenerator, &game, depth).nodes;

    let mut group = c.benchmark_group("perft_threaded");
    group.sample_size(10);
    group.bench_function("kiwipete_d3", |b| {
        b.iter(|| {
            let count = perft_multi_threaded(Arc::clone(&generator), black_box(&game), depth)
                .expect("perft workers should not panic");
            assert_eq!(count.nodes, expected);
            black_box(count.nodes)
        });
    });
    group.finish();
}

fn bench_square_queries(c: &mut Criterion) {
    let game = GameState::from_fen(KIWIPETE_FEN).expect("benchmark FEN should parse");
    let squares: Vec<_> = game.board.squares_of(game.side_to_move).collect();

    c.bench_function("legal_moves_per_square_kiwipete", |b| {
        b.iter(|| {
            squares
                .iter()
                .map(|square| legal_moves(black_box(&game), *square).len())
                .sum::<usize>()
        });
    });
}

criterion_group!(
    perft_benches,
    bench_perft,
    bench_threaded_perft,
    bench_square_queries
);
criterion_main!(perft_benches);

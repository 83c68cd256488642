//! Move engine and codec benchmarks
//!
//! Replays the solution of each fixture level from a fresh grid, and times a
//! decode/encode pass over the same documents.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sokoban_rs::{
    core::Grid,
    game::{parse_moves, try_move, Direction},
    level::{decode, encode, LevelFile},
};
use std::path::PathBuf;

struct Fixture {
    name: &'static str,
    grid: Grid,
    moves: Vec<Direction>,
}

fn load_fixtures() -> Vec<Fixture> {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_levels");
    ["first_steps", "two_boxes", "cold_start"]
        .into_iter()
        .map(|name| {
            let grid = LevelFile::load(&dir.join(format!("{name}.xml"))).expect("fixture level");
            let moves = std::fs::read_to_string(dir.join(format!("{name}.moves")))
                .expect("fixture moves");
            Fixture {
                name,
                grid,
                moves: parse_moves(&moves).expect("valid moves"),
            }
        })
        .collect()
}

fn bench_replay(c: &mut Criterion) {
    let fixtures = load_fixtures();
    let mut group = c.benchmark_group("replay");

    for fixture in &fixtures {
        group.bench_with_input(BenchmarkId::from_parameter(fixture.name), fixture, |b, f| {
            b.iter(|| {
                let mut grid = f.grid.clone();
                let mut player = grid.player_position();
                for &direction in &f.moves {
                    let outcome = try_move(&mut grid, player, direction);
                    if let Some(dest) = outcome.player_destination() {
                        player = dest;
                    }
                }
                black_box(grid.is_solved())
            })
        });
    }
    group.finish();
}

fn bench_rejected_push(c: &mut Criterion) {
    let fixtures = load_fixtures();
    // Cold Start: the box below the player sits against the wall
    let mut grid = fixtures[2].grid.clone();
    let player = grid.player_position();

    c.bench_function("rejected_push", |b| {
        b.iter(|| black_box(try_move(&mut grid, player, Direction::Down).moved))
    });
}

fn bench_codec(c: &mut Criterion) {
    let fixtures = load_fixtures();
    let documents: Vec<String> = fixtures.iter().map(|f| encode(&f.grid)).collect();

    c.bench_function("decode_fixtures", |b| {
        b.iter(|| {
            for doc in &documents {
                black_box(decode(doc).expect("fixture decodes"));
            }
        })
    });

    c.bench_function("encode_fixtures", |b| {
        b.iter(|| {
            for f in &fixtures {
                black_box(encode(&f.grid));
            }
        })
    });
}

criterion_group!(benches, bench_replay, bench_rejected_push, bench_codec);
criterion_main!(benches);

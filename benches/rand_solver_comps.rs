#![allow(unused)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::seq::SliceRandom;

use dlx_sudoku::dfs;
use dlx_sudoku::rules::Candidate;
use dlx_sudoku::solver;

/// A small pool of puzzles of varying difficulty, embedded rather than read from a corpus
/// file (the teacher's own `rand_solver_comps.rs` reads a `tests/sudoku17` collection file
/// that never shipped with the retrieved repo). `randomized_inputs` below samples 3 of
/// these at random each run, echoing the teacher's "randomly pick 3 inputs" shape without
/// depending on a missing external file.
const PUZZLES: [(&str, &str); 5] = [
    (
        "17-clue-a",
        "000080100\n000000043\n500000000\n000070800\n000000100\n020030000\n600000075\n003400000\n000200600",
    ),
    (
        "17-clue-b",
        "000000010\n400000000\n020000000\n000050407\n008000300\n001090000\n300400200\n050100000\n000807000",
    ),
    (
        "30-clue",
        "530070000\n600195000\n098000060\n800060003\n400803001\n700020006\n060000280\n000419005\n000080079",
    ),
    (
        "25-clue",
        "200080300\n060070084\n030500209\n000105408\n000000000\n402706000\n301007040\n720040060\n004010003",
    ),
    ("empty", "000000000\n000000000\n000000000\n000000000\n000000000\n000000000\n000000000\n000000000\n000000000"),
];

/// Randomly picks 3 puzzles from [`PUZZLES`] to use as benchmark inputs this run.
fn randomized_inputs() -> Vec<(&'static str, &'static str)> {
    let mut rng = rand::thread_rng();
    PUZZLES.choose_multiple(&mut rng, 3).copied().collect()
}

fn to_grid(puzzle: &str) -> dfs::Grid {
    let mut grid = [[0u8; 9]; 9];
    for (r, line) in puzzle.lines().enumerate() {
        for (c, ch) in line.chars().enumerate() {
            grid[r][c] = ch.to_digit(10).unwrap_or(0) as u8;
        }
    }
    grid
}

fn to_candidates(puzzle: &str) -> Vec<Candidate> {
    let grid = to_grid(puzzle);
    let mut out = Vec::new();
    for (r, row) in grid.iter().enumerate() {
        for (c, &digit) in row.iter().enumerate() {
            if digit != 0 {
                out.push(Candidate::new((r + 1) as u8, (c + 1) as u8, digit));
            }
        }
    }
    out
}

fn bench_solvers(c: &mut Criterion) {
    let mut group = c.benchmark_group("Solvers");

    for (name, puzzle) in randomized_inputs() {
        group.bench_with_input(BenchmarkId::new("naive-dfs", name), puzzle, |b, puzzle| {
            b.iter(|| {
                let mut grid = to_grid(puzzle);
                dfs::solve(black_box(&mut grid))
            })
        });
        group.bench_with_input(BenchmarkId::new("dlx", name), puzzle, |b, puzzle| {
            b.iter(|| {
                let fixed = to_candidates(puzzle);
                solver::solve(black_box(&fixed))
            })
        });
    }
}

criterion_group!(benches, bench_solvers);
criterion_main!(benches);

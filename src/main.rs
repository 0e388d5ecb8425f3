use std::env;
use std::process::ExitCode;

use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use dlx_sudoku::importer;
use dlx_sudoku::solver;
use dlx_sudoku::visualizer;

/// Missing or malformed CLI argument.
const EXIT_BAD_ARG: u8 = 1;
/// Puzzle file unreadable or failed to parse.
const EXIT_BAD_FILE: u8 = 2;
/// Puzzle file parsed fine but has no solution.
const EXIT_NO_SOLUTION: u8 = 3;

fn main() -> ExitCode {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info")); // RUST_LOG

    let mut args = env::args();
    let _bin = args.next();
    let path = match args.next() {
        Some(path) => path,
        None => {
            error!("usage: dlx-sudoku <puzzle-file>");
            return ExitCode::from(EXIT_BAD_ARG);
        }
    };

    let fixed = match importer::import_candidates(&path) {
        Ok(fixed) => fixed,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(EXIT_BAD_FILE);
        }
    };

    info!("loaded {} fixed candidates from {}", fixed.len(), path);
    let already_complete = fixed.len() == 81;
    let solution = solver::solve(&fixed);

    if solution.is_empty() && !already_complete {
        error!("no solution exists for the given puzzle");
        return ExitCode::from(EXIT_NO_SOLUTION);
    }

    let all: Vec<_> = fixed.into_iter().chain(solution).collect();
    println!("{}", visualizer::render(&all));

    ExitCode::SUCCESS
}

//! Recursive backtracking driver over the constraint matrix: build, search, return.
//!
//! Builds the matrix by pre-excluding fixed candidates and every candidate that conflicts
//! with them (rather than building the full matrix and covering each fixed candidate), per
//! the specified strategy -- smaller matrix, no history to unwind for the prelude.

use std::collections::HashSet;

use cpu_time::ProcessTime;
use log::{debug, info};

use crate::matrix::ConstraintMatrix;
use crate::rules::{self, Candidate, Constraint};

/// Solves a Sudoku puzzle given its fixed (pre-filled) candidates. Returns the candidates
/// that complete the puzzle (not including `fixed`); an empty vector means no solution
/// exists for the given fixed candidates.
pub fn solve(fixed: &[Candidate]) -> Vec<Candidate> {
    let start = ProcessTime::now();
    debug!("building matrix for {} fixed candidates", fixed.len());

    let mut matrix = build(fixed);
    let mut partial = Vec::new();
    search(&mut matrix, &mut partial);

    let is_solved = matrix.solved();
    let result = if is_solved { partial } else { Vec::new() };

    let elapsed_ms = start.elapsed().as_millis();
    if is_solved {
        info!(
            "solved with {} further placements in {} ms of CPU time",
            result.len(),
            elapsed_ms
        );
    } else {
        info!("no solution found after {} ms of CPU time", elapsed_ms);
    }

    result
}

fn build(fixed: &[Candidate]) -> ConstraintMatrix<Candidate, Constraint> {
    let fixed_set: HashSet<Candidate> = fixed.iter().copied().collect();
    let fixed_constraints: HashSet<Constraint> = fixed
        .iter()
        .flat_map(|&c| rules::constraints_of(c))
        .collect();

    let mut matrix = ConstraintMatrix::new();
    for candidate in rules::all_candidates() {
        if fixed_set.contains(&candidate) {
            continue;
        }
        let satisfied = rules::constraints_of(candidate);
        if satisfied.iter().any(|c| fixed_constraints.contains(c)) {
            continue;
        }
        matrix.add(candidate, satisfied);
    }
    matrix
}

/// `solve(matrix, partial)` from SPEC_FULL.md section 4.3, translated into an imperative
/// loop over an explicit `partial` accumulator instead of returning a new vector each frame.
fn search(matrix: &mut ConstraintMatrix<Candidate, Constraint>, partial: &mut Vec<Candidate>) {
    if matrix.exhausted() {
        return;
    }

    let col = matrix.choose_column();
    for candidate_ref in matrix.candidates_of(col) {
        matrix.cover(&candidate_ref);
        partial.push(candidate_ref.candidate);

        search(matrix, partial);
        if matrix.solved() {
            // Solution found; the matrix is left covered on purpose -- the caller is done
            // with it, and uncovering here would be wasted work on the winning path.
            return;
        }

        partial.pop();
        matrix.uncover();
    }
}

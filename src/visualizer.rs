//! Renders a completed (or partial) candidate list as a human-readable 9x9 grid.
//!
//! Layout ported from the original Python `visualizer.py`: pipe-delimited cells, a block
//! boundary marker between every group of three columns *and* a blank line between every
//! group of three rows, and `_` for any cell with no candidate.

use std::fmt::Write as _;

use crate::rules::Candidate;

/// Renders `candidates` as a 9-row grid, with a block-boundary marker (`||`) between
/// column groups 3/4 and 6/7 and a blank line between row groups 3/4 and 6/7, mirroring
/// both dimensions of Sudoku's 3x3 blocks. Cells with no candidate render as `_`; if more
/// than one candidate targets the same cell, the last one in `candidates` wins.
pub fn render(candidates: &[Candidate]) -> String {
    let mut grid = [[b'_'; 9]; 9];
    for candidate in candidates {
        let row = (candidate.row - 1) as usize;
        let col = (candidate.col - 1) as usize;
        grid[row][col] = b'0' + candidate.digit;
    }

    let mut out = String::new();
    for (row_idx, row) in grid.iter().enumerate() {
        if row_idx != 0 && row_idx % 3 == 0 {
            out.push('\n');
        }
        let groups: Vec<String> = row
            .chunks(3)
            .map(|chunk| {
                chunk
                    .iter()
                    .map(|&b| (b as char).to_string())
                    .collect::<Vec<String>>()
                    .join(" | ")
            })
            .collect();
        let _ = writeln!(out, "{}", groups.join(" || "));
    }
    out
}

//! Parses a grid text file into a list of fixed candidates.
//!
//! Format: nine non-blank lines of nine comma-separated fields; `_` marks an empty cell;
//! a digit `1`-`9` is a fixed value; blank lines are ignored; whitespace around fields is
//! stripped.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use crate::rules::Candidate;

/// Malformed input detected while parsing a puzzle file.
#[derive(Debug)]
pub enum ParseError {
    /// Could not read the file at all.
    Io(io::Error),
    /// A non-blank row did not have exactly nine fields.
    WrongFieldCount { line: usize, found: usize },
    /// The puzzle did not have exactly nine non-blank rows.
    WrongRowCount { found: usize },
    /// A field was neither `_` nor a single digit `1`-`9`.
    MalformedField { line: usize, column: usize, field: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Io(e) => write!(f, "could not read puzzle file: {}", e),
            ParseError::WrongFieldCount { line, found } => write!(
                f,
                "row {} has {} fields, expected 9",
                line, found
            ),
            ParseError::WrongRowCount { found } => {
                write!(f, "puzzle has {} non-blank rows, expected 9", found)
            }
            ParseError::MalformedField { line, column, field } => write!(
                f,
                "row {}, column {}: '{}' is not '_' or a digit 1-9",
                line, column, field
            ),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> Self {
        ParseError::Io(e)
    }
}

/// Parses a puzzle file into the ordered candidates implied by its non-`_` fields.
pub fn import_candidates(path: impl AsRef<Path>) -> Result<Vec<Candidate>, ParseError> {
    let text = fs::read_to_string(path)?;
    parse_candidates(&text)
}

/// Parses puzzle text (see module docs for the grammar) into an ordered candidate list.
pub fn parse_candidates(text: &str) -> Result<Vec<Candidate>, ParseError> {
    let rows = non_blank_rows(text);
    if rows.len() != 9 {
        return Err(ParseError::WrongRowCount { found: rows.len() });
    }

    let mut candidates = Vec::new();
    for (row_idx, fields) in rows.iter().enumerate() {
        if fields.len() != 9 {
            return Err(ParseError::WrongFieldCount {
                line: row_idx + 1,
                found: fields.len(),
            });
        }
        for (col_idx, field) in fields.iter().enumerate() {
            if *field == "_" {
                continue;
            }
            let digit = parse_digit(field).ok_or_else(|| ParseError::MalformedField {
                line: row_idx + 1,
                column: col_idx + 1,
                field: field.to_string(),
            })?;
            candidates.push(Candidate::new((row_idx + 1) as u8, (col_idx + 1) as u8, digit));
        }
    }

    Ok(candidates)
}

fn non_blank_rows(text: &str) -> Vec<Vec<&str>> {
    text.lines()
        .map(|line| {
            line.split(',')
                .map(str::trim)
                .collect::<Vec<&str>>()
        })
        .filter(|fields| !(fields.len() == 1 && fields[0].is_empty()))
        .collect()
}

fn parse_digit(field: &str) -> Option<u8> {
    if field.len() != 1 {
        return None;
    }
    let digit = field.chars().next()?.to_digit(10)? as u8;
    if (1..=9).contains(&digit) {
        Some(digit)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "\
5,3,_,_,7,_,_,_,_
6,_,_,1,9,5,_,_,_
_,9,8,_,_,_,_,6,_

8,_,_,_,6,_,_,_,3
4,_,_,8,_,3,_,_,1
7,_,_,_,2,_,_,_,6

_,6,_,_,_,_,2,8,_
_,_,_,4,1,9,_,_,5
_,_,_,_,8,_,_,7,9
";

    #[test]
    fn parses_well_formed_puzzle_into_expected_candidates() {
        let candidates = parse_candidates(WELL_FORMED).unwrap();
        assert_eq!(candidates.len(), 30);
        assert!(candidates.contains(&Candidate::new(1, 1, 5)));
        assert!(candidates.contains(&Candidate::new(9, 9, 9)));
        assert!(candidates.contains(&Candidate::new(2, 4, 1)));
    }

    #[test]
    fn blank_separator_lines_are_ignored() {
        let with_blanks = "5,3,_,_,7,_,_,_,_\n\n\n6,_,_,1,9,5,_,_,_\n";
        let without_blanks = "5,3,_,_,7,_,_,_,_\n6,_,_,1,9,5,_,_,_\n";
        // Both are malformed (only two rows) but should fail identically either way.
        let with = parse_candidates(with_blanks);
        let without = parse_candidates(without_blanks);
        assert!(matches!(with, Err(ParseError::WrongRowCount { found: 2 })));
        assert!(matches!(without, Err(ParseError::WrongRowCount { found: 2 })));
    }

    #[test]
    fn whitespace_around_fields_is_stripped() {
        let spaced = "5, 3 , _ , _,7,_,_,_,_\n".repeat(9);
        let candidates = parse_candidates(&spaced).unwrap();
        assert_eq!(candidates.len(), 18); // two fixed fields per row * 9 rows
    }

    #[test]
    fn rejects_wrong_field_count() {
        let mut rows: Vec<String> = (0..9).map(|_| "_,_,_,_,_,_,_,_,_".to_string()).collect();
        rows[3] = "_,_,_,_,_,_,_,_".to_string(); // 8 fields
        let text = rows.join("\n");
        let err = parse_candidates(&text).unwrap_err();
        assert!(matches!(
            err,
            ParseError::WrongFieldCount { line: 4, found: 8 }
        ));
    }

    #[test]
    fn rejects_wrong_row_count() {
        let rows: Vec<String> = (0..8).map(|_| "_,_,_,_,_,_,_,_,_".to_string()).collect();
        let text = rows.join("\n");
        let err = parse_candidates(&text).unwrap_err();
        assert!(matches!(err, ParseError::WrongRowCount { found: 8 }));
    }

    #[test]
    fn rejects_malformed_field() {
        let mut rows: Vec<String> = (0..9).map(|_| "_,_,_,_,_,_,_,_,_".to_string()).collect();
        rows[0] = "0,_,_,_,_,_,_,_,_".to_string();
        let text = rows.join("\n");
        let err = parse_candidates(&text).unwrap_err();
        assert!(matches!(
            err,
            ParseError::MalformedField { line: 1, column: 1, .. }
        ));
    }

    #[test]
    fn rejects_missing_file() {
        let err = import_candidates("/nonexistent/path/does/not/exist.txt").unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}

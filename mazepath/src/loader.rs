//! Reading mazes from delimited text.
//!
//! Every non-blank line is a row, cells are separated by a delimiter and may be quoted. A cell is
//! blocked when its field is exactly `1`, anything else (including ` 1`) counts as passable.

use std::{fs, path::Path};

use thiserror::Error;

use crate::grid::{GridError, MazeGrid};

pub const DEFAULT_DELIMITER: char = ',';

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read maze file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed maze file: {0}")]
    Csv(#[from] csv::Error),
    #[error("delimiter must be a single ascii character, got {0:?}")]
    Delimiter(char),
    #[error("maze file has no rows")]
    Empty,
    #[error("line {line} has {found} cells, expected {expected}")]
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },
}

pub fn load_file(path: impl AsRef<Path>, delimiter: char) -> Result<MazeGrid, LoadError> {
    let path = path.as_ref();
    log::debug!("Loading maze from {:?}", path);
    let text = fs::read_to_string(path)?;
    parse_str(&text, delimiter)
}

pub fn parse_str(text: &str, delimiter: char) -> Result<MazeGrid, LoadError> {
    if !delimiter.is_ascii() {
        return Err(LoadError::Delimiter(delimiter));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter as u8)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows: Vec<Vec<bool>> = Vec::new();
    let mut lines = Vec::new();

    for record in reader.records() {
        let record = record?;
        // whitespace-only lines come through as a single blank field
        if record.len() == 1 && record[0].trim().is_empty() {
            continue;
        }

        let line = record
            .position()
            .map_or(rows.len() + 1, |pos| pos.line() as usize);
        let row: Vec<bool> = record.iter().map(|field| field == "1").collect();
        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                return Err(LoadError::Ragged {
                    line,
                    expected: first.len(),
                    found: row.len(),
                });
            }
        }

        rows.push(row);
        lines.push(line);
    }

    MazeGrid::from_rows(&rows).map_err(|err| match err {
        GridError::Empty => LoadError::Empty,
        GridError::Ragged {
            row,
            expected,
            found,
        } => LoadError::Ragged {
            line: lines.get(row).copied().unwrap_or(row + 1),
            expected,
            found,
        },
    })
}

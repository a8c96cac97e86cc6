//! Catalog loading
//!
//! The source is read into an owned buffer and split into lines up front;
//! lines are then parsed in parallel and reassembled in file order. The file
//! belongs to whoever maintains the catalog and may be rewritten while a
//! reload reads it, so it is never memory-mapped. The first malformed line
//! (in file order) rejects the whole load.

use crate::catalog::parser::parse_record;
use crate::catalog::types::{Catalog, Record};
use crate::error::{LoadError, RecordError};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use std::time::Instant;

impl Catalog {
    /// Load a catalog generation from a fixed-width file
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let start = Instant::now();
        let unavailable = |source| LoadError::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        };

        let content = fs::read(path).map_err(unavailable)?;
        let catalog = Self::from_bytes(&content)?;

        tracing::info!(
            path = %path.display(),
            records = catalog.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "loaded catalog"
        );

        Ok(catalog)
    }

    /// Parse a catalog from an in-memory copy of the source
    pub fn from_bytes(content: &[u8]) -> Result<Self, LoadError> {
        let lines = split_lines(content);

        let parsed: Vec<Result<Record, RecordError>> =
            lines.par_iter().map(|line| parse_record(line)).collect();

        let mut records = Vec::with_capacity(parsed.len());
        for (index, result) in parsed.into_iter().enumerate() {
            let record = result.map_err(|source| LoadError::MalformedRecord {
                line: index + 1,
                source,
            })?;
            records.push(record);
        }

        Ok(Catalog::new(records))
    }
}

/// Split content into lines, dropping terminators
///
/// A trailing newline does not start an extra empty line and a `\r` before
/// each `\n` is stripped.
fn split_lines(content: &[u8]) -> Vec<&[u8]> {
    let mut lines = Vec::with_capacity(content.len() / 80 + 1);
    let mut start = 0;

    for end in memchr::memchr_iter(b'\n', content) {
        lines.push(strip_cr(&content[start..end]));
        start = end + 1;
    }

    if start < content.len() {
        lines.push(strip_cr(&content[start..]));
    }

    lines
}

#[inline]
fn strip_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

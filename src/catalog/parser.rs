//! Fixed-width record parsing
//!
//! Fields are sliced at fixed byte offsets and trimmed. Slicing works on bytes
//! and each field is decoded lossily, so a multi-byte character cut by an
//! offset degrades to a replacement character instead of panicking.

use crate::catalog::types::{
    Record, CODE_RANGE, FORM_RANGE, MIN_LINE_LEN, NAME_RANGE, STRENGTH_RANGE,
};
use crate::error::RecordError;
use std::ops::Range;

/// Parse one fixed-width line (without its line terminator)
pub fn parse_record(line: &[u8]) -> Result<Record, RecordError> {
    if line.len() < MIN_LINE_LEN {
        return Err(RecordError::TooShort {
            found: line.len(),
            expected: MIN_LINE_LEN,
        });
    }

    Ok(Record {
        code: field(line, CODE_RANGE),
        name: field(line, NAME_RANGE),
        strength: field(line, STRENGTH_RANGE),
        form: field(line, FORM_RANGE),
    })
}

#[inline]
fn field(line: &[u8], range: Range<usize>) -> String {
    String::from_utf8_lossy(&line[range]).trim().to_string()
}

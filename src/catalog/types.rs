use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Position of a record inside one catalog generation
pub type Position = usize;

/// Byte range of the NAPPI product code
pub const CODE_RANGE: Range<usize> = 11..20;

/// Byte range of the product name (the indexed field)
pub const NAME_RANGE: Range<usize> = 20..58;

/// Byte range of the free-text strength
pub const STRENGTH_RANGE: Range<usize> = 59..75;

/// Byte range of the dosage form code
pub const FORM_RANGE: Range<usize> = 75..79;

/// Minimum line length: the highest offset any field reads
pub const MIN_LINE_LEN: usize = FORM_RANGE.end;

/// One catalog entry parsed from a fixed-width line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub code: String,
    pub name: String,
    pub strength: String,
    pub form: String,
}

impl Record {
    /// Key under which this record is indexed
    pub fn index_key(&self) -> String {
        self.name.to_lowercase()
    }
}

/// An ordered, immutable sequence of records produced by a single load pass
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<Record>,
}

impl Catalog {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, position: Position) -> Option<&Record> {
        self.records.get(position)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &Record)> {
        self.records.iter().enumerate()
    }
}

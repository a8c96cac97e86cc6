use crate::catalog::types::{Catalog, Position, Record};
use crate::index::keyword::KeywordIndex;
use crate::query::parser::QueryTerms;
use rayon::prelude::*;

/// Above this many distinct names the key scan is split across threads
const PARALLEL_SCAN_THRESHOLD: usize = 16_384;

/// Multi-keyword AND matcher over one catalog generation
pub struct QueryExecutor<'a> {
    catalog: &'a Catalog,
    index: &'a KeywordIndex,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(catalog: &'a Catalog, index: &'a KeywordIndex) -> Self {
        Self { catalog, index }
    }

    /// Records whose name contains every surviving token
    pub fn execute(&self, terms: &QueryTerms) -> Vec<&'a Record> {
        self.resolve(&self.matching_positions(terms))
    }

    /// Map positions back to records of this generation
    pub fn resolve(&self, positions: &[Position]) -> Vec<&'a Record> {
        positions
            .iter()
            .filter_map(|&p| self.catalog.get(p))
            .collect()
    }

    /// Positions whose name contains every surviving token, ascending
    ///
    /// Every key is scanned and each token is checked as a substring of the
    /// whole lower-cased name. All positions under a key share that key's set
    /// of matched tokens, and a position lives under exactly one key, so
    /// comparing the matched count per key with the number of surviving
    /// tokens decides membership for all of its positions at once.
    pub fn matching_positions(&self, terms: &QueryTerms) -> Vec<Position> {
        if terms.is_empty() {
            return Vec::new();
        }

        let required = terms.len();
        let tokens = terms.tokens();
        let entries = self.index.entries();

        let mut positions: Vec<Position> = if entries.len() >= PARALLEL_SCAN_THRESHOLD {
            entries
                .par_iter()
                .filter(|(key, _)| matched_tokens(key, tokens) == required)
                .flat_map_iter(|(_, positions)| positions.iter().copied())
                .collect()
        } else {
            entries
                .iter()
                .filter(|(key, _)| matched_tokens(key, tokens) == required)
                .flat_map(|(_, positions)| positions.iter().copied())
                .collect()
        };

        positions.sort_unstable();
        positions
    }
}

/// Number of distinct tokens occurring as substrings of `key`
#[inline]
fn matched_tokens(key: &str, tokens: &[String]) -> usize {
    tokens.iter().filter(|token| key.contains(token.as_str())).count()
}

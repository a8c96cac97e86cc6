//! Query tokenization
//!
//! A raw query is split on whitespace. Tokens shorter than
//! [`MIN_TOKEN_LEN`] characters are dropped; the rest are lower-cased and
//! de-duplicated, keeping first-occurrence order. Those surviving tokens are
//! what the executor matches.

use crate::error::InvalidQuery;

/// Tokens shorter than this never take part in matching
///
/// Lengths here and in [`validate_term`] are counted in characters, not
/// bytes; the two agree on ASCII catalog data.
pub const MIN_TOKEN_LEN: usize = 3;

/// Surviving tokens of a query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryTerms {
    tokens: Vec<String>,
}

impl QueryTerms {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when no token survived; such a query matches nothing
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Normalized form used as a result-cache key
    pub fn cache_key(&self) -> String {
        self.tokens.join(" ")
    }
}

/// Split a raw query on whitespace
pub fn tokenize(query: &str) -> Vec<&str> {
    query.split_whitespace().collect()
}

/// Tokenize a raw query and keep only the tokens that take part in matching
pub fn parse_query(query: &str) -> QueryTerms {
    let mut tokens: Vec<String> = Vec::new();

    for token in tokenize(query) {
        if token.chars().count() < MIN_TOKEN_LEN {
            continue;
        }

        let lowered = token.to_lowercase();
        if !tokens.contains(&lowered) {
            tokens.push(lowered);
        }
    }

    QueryTerms { tokens }
}

/// Caller-side gate applied to a request's search term before searching
///
/// Independent of the per-token filter: a term of three spaces passes here
/// and then yields no tokens at all.
pub fn validate_term(term: Option<&str>, min_len: usize) -> Result<&str, InvalidQuery> {
    let term = match term {
        Some(t) if !t.is_empty() => t,
        _ => return Err(InvalidQuery::Missing),
    };

    if term.chars().count() < min_len {
        return Err(InvalidQuery::TooShort { min: min_len });
    }

    Ok(term)
}

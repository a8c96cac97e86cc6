//! Request and response bodies of the HTTP query surface

use crate::catalog::types::Record;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Query string of `GET /autocomplete`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AutocompleteParams {
    pub term: Option<String>,
}

/// Autocomplete results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutocompleteResponse {
    /// Matching records in catalog order
    pub results: Vec<Record>,
    pub count: usize,
    /// Catalog generation the results were read from
    pub generation: u64,
    /// Whether results came from the query cache
    pub cached: bool,
    /// Time taken in milliseconds
    pub duration_ms: f64,
}

/// Service status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub uptime_secs: u64,
    /// Whether a catalog generation is live
    pub ready: bool,
    pub generation: Option<u64>,
    pub source: PathBuf,
    pub records: usize,
    pub distinct_names: usize,
    /// Unix timestamp of the live generation
    pub loaded_at: Option<u64>,
    pub queries_served: u64,
    /// Cache hit rate (0.0 - 1.0)
    pub cache_hit_rate: f32,
}

/// Outcome of `POST /reload`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReloadResponse {
    pub success: bool,
    pub message: String,
    /// Live generation after the attempt
    pub generation: Option<u64>,
    pub records: usize,
}

/// Error payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Stable error code identifier
    pub code: String,
    pub message: String,
}

//! # nappi - NAPPI catalog autocomplete
//!
//! Loads a fixed-width pharmaceutical product catalog into memory, indexes
//! product names and answers multi-keyword substring queries over HTTP.
//!
//! ## Architecture
//!
//! - [`catalog`] - fixed-width record parsing and catalog loading
//! - [`index`] - keyword index from lower-cased names to catalog positions
//! - [`query`] - query tokenization and the AND-match executor
//! - [`server`] - the catalog service (generation swap) and HTTP routes
//! - [`output`] - terminal output for one-shot searches
//! - [`utils`] - configuration and logging
//!
//! ## Quick Start
//!
//! ```no_run
//! use nappi::catalog::Catalog;
//! use nappi::index::KeywordIndex;
//! use nappi::query::{parse_query, QueryExecutor};
//! use std::path::Path;
//!
//! let catalog = Catalog::load(Path::new("nappi_data.txt")).unwrap();
//! let index = KeywordIndex::build(&catalog);
//!
//! let executor = QueryExecutor::new(&catalog, &index);
//! for record in executor.execute(&parse_query("paracetamol syrup")) {
//!     println!("{} {} {} {}", record.code, record.name, record.strength, record.form);
//! }
//! ```
//!
//! ## Matching
//!
//! A query is split on whitespace and tokens shorter than three characters
//! are ignored. A record matches when every remaining token occurs, case
//! insensitively, somewhere in its product name.

pub mod catalog;
pub mod error;
pub mod index;
pub mod output;
pub mod query;
pub mod server;
pub mod utils;

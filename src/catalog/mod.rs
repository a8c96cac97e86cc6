//! Catalog records and loading
//!
//! - [`types`] - `Record`, `Catalog` and the fixed-width field layout
//! - [`parser`] - one line to one `Record`
//! - [`loader`] - whole-file loading into a `Catalog`

pub mod loader;
pub mod parser;
pub mod types;

pub use parser::parse_record;
pub use types::*;

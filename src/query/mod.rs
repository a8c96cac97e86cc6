pub mod executor;
pub mod parser;

pub use executor::QueryExecutor;
pub use parser::{parse_query, tokenize, validate_term, QueryTerms, MIN_TOKEN_LEN};

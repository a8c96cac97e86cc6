pub mod keyword;
pub mod stats;

pub use keyword::KeywordIndex;
pub use stats::CatalogStats;

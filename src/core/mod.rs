pub mod cache;
pub mod logger;
pub mod query;
pub mod query_processor;

pub use cache::ResponseCache;
pub use query::{QueryType, analyze_query};
pub use query_processor::{QueryOutcome, QueryProcessor, SourceFailure, rank_packages};

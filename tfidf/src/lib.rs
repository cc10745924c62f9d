//! Vector space scoring for full text search
//!
//! Documents are analyzed into tokens, indexed with per field statistics and
//! length norms, and scored against term, phrase and boolean queries with a
//! TF-IDF similarity. Every score can be explained as a tree of the factors
//! that produced it.

#[macro_use]
extern crate log;
#[macro_use]
extern crate maplit;
#[macro_use]
extern crate serde_json;
#[macro_use]
extern crate bitflags;

pub mod term;
pub mod token;
pub mod analysis;
pub mod schema;
pub mod document;
pub mod statistics;
pub mod explanation;
pub mod norms;
pub mod similarity;
pub mod store;
pub mod query;
pub mod collectors;
pub mod search;

pub use term::Term;
pub use token::Token;
pub use document::Document;
pub use explanation::Explanation;
pub use statistics::{CollectionStatistics, TermStatistics};
pub use similarity::{SimilarityModel, IdfStats, SimScorer};
pub use query::Query;
pub use search::Searcher;

pub mod builder;
pub mod corpus;
pub mod error;
pub mod index;
pub mod loader;
pub mod persist;
pub mod query;
pub mod tokenizer;
pub mod vector;

pub use builder::build_index;
pub use corpus::{read_corpus, CorpusReader, Document};
pub use error::Error;
pub use index::Index;
pub use loader::load_index;
pub use query::execute_query;

/// A normalized (lowercased, stemmed) word unit.
pub type Term = String;
/// Opaque document identifier, stable across build and reload.
pub type DocId = String;

pub type Result<T> = std::result::Result<T, Error>;

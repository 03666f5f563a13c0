//! TF-IDF vector-space search over a small in-memory corpus.
//!
//! Text goes through [`tokenizer::Preprocessor`] (normalize, split, stopwords, stem),
//! [`frequency`] turns tokens into normalized term frequencies and document
//! frequencies, [`index::VectorIndex`] stores one TF-IDF vector per document, and
//! [`similarity`] compares a query vector against each of them.
//! [`engine::SearchEngine`] ties these together behind a locked lifecycle.

pub mod config;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod frequency;
pub mod index;
pub mod similarity;
pub mod stopwords;
pub mod tokenizer;
pub mod vector;

pub use config::{EngineConfig, Language};
pub use corpus::{Corpus, Document};
pub use engine::{BuildReport, EngineState, IngestReport, SearchEngine, SearchHit, Snapshot};
pub use error::{Result, SearchError};
pub use index::{InvertedIndex, Posting, VectorIndex};
pub use similarity::SimilarityMethod;

//! Related-idea retrieval.
//!
//! Given the full set of idea records, computes for any one record a
//! ranked set of related records: user-pinned partners first, then
//! threshold-filtered similarity suggestions with blacklist, self and
//! pinned exclusion, optionally reordered by a pluggable reranker.
//!
//! # Architecture
//!
//! - `tokenize`: text -> normalized tokens
//! - `engine`: embeddings and cosine scoring
//! - `index`: in-memory id -> vector store with top-K query
//! - `rerank`: candidate reordering (no-op baseline, keyword RRF)
//! - `service`: orchestration of the above

pub mod engine;
pub mod index;
pub mod rerank;
mod service;
mod tokenize;

pub use engine::{BagOfWordsEngine, SimilarityEngine};
pub use index::{EmbeddingIndex, LinearIndex};
pub use rerank::{KeywordRrfReranker, NoOpReranker, Reranker};
pub use service::{RelatedIdeasService, RelatedResult};
pub use tokenize::tokenize;

//! relata — related-idea retrieval.
//!
//! The algorithmic core of an idea-collection application: given a
//! growing set of short title+body records, compute for any one record
//! a ranked set of semantically related records, honoring user-pinned
//! links and blacklisted pairs. CRUD, views and persistence live in
//! the host application; this crate only reads records and hands back
//! ordered results.
//!
//! Ranking is deterministic and reproducible for fixed inputs and
//! configuration. The baseline engine is token-frequency statistics,
//! not a learned model; the `SimilarityEngine`, `EmbeddingIndex` and
//! `Reranker` traits are the seams for swapping in heavier
//! implementations.
//!
//! ```
//! use std::collections::HashSet;
//! use relata::{Idea, Link, LinkKind, RelatedIdeasService, RelatedPreferences};
//!
//! let ideas = vec![
//!     Idea::new("SwiftUI", Some("List Navigation".to_string())),
//!     Idea::new("UIKit", Some("TableView".to_string())),
//! ];
//! let links = vec![Link::new(
//!     ideas[0].id.clone(),
//!     ideas[1].id.clone(),
//!     LinkKind::Manual,
//!     true,
//! )];
//!
//! let mut service = RelatedIdeasService::default();
//! service.rebuild_index(&ideas);
//!
//! let prefs = RelatedPreferences::default().clamped();
//! let result = service.related(
//!     &ideas[0],
//!     &ideas,
//!     &links,
//!     &HashSet::new(),
//!     prefs.max_n,
//!     prefs.tau,
//! );
//! assert_eq!(result.pinned[0].id, ideas[1].id);
//! ```

pub mod config;
pub mod ideas;
pub mod links;
pub mod related;
#[cfg(test)]
mod tests;

pub use config::{PreferencesError, RelatedPreferences};
pub use ideas::{Idea, IdeaId};
pub use links::{contains_pair, BlockedPair, Link, LinkKind, PairKey};
pub use related::{
    BagOfWordsEngine, EmbeddingIndex, KeywordRrfReranker, LinearIndex, NoOpReranker,
    RelatedIdeasService, RelatedResult, Reranker, SimilarityEngine,
};

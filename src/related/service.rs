//! Related-ideas orchestration.
//!
//! Composes the similarity engine, the embedding index and the
//! reranker into the two entry points the presentation layer calls:
//! `rebuild_index` and `related`. All degraded conditions resolve to a
//! smaller, still-valid result; nothing here returns an error.

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;

use crate::ideas::{Idea, IdeaId};
use crate::links::{contains_pair, BlockedPair, Link};
use crate::related::engine::{BagOfWordsEngine, SimilarityEngine};
use crate::related::index::{EmbeddingIndex, LinearIndex};
use crate::related::rerank::{NoOpReranker, Reranker};

/// Related ideas for one query record.
///
/// `pinned` is surfaced ahead of `suggested`; the buckets never
/// overlap, and neither contains the query record. Either bucket may
/// be empty.
#[derive(Debug, Clone, Default)]
pub struct RelatedResult {
    pub pinned: Vec<Idea>,
    pub suggested: Vec<Idea>,
}

/// Computes related ideas from embeddings, user-pinned links and a
/// blacklist. Engine, index and reranker are injected at construction
/// time and swappable through their capability traits.
///
/// One logical owner per instance: `rebuild_index` takes `&mut self`,
/// so concurrent callers must serialize through their own exclusive
/// access.
pub struct RelatedIdeasService {
    engine: Box<dyn SimilarityEngine>,
    index: Box<dyn EmbeddingIndex>,
    reranker: Box<dyn Reranker>,
}

impl Default for RelatedIdeasService {
    fn default() -> Self {
        Self::new(
            Box::new(BagOfWordsEngine::default()),
            Box::new(LinearIndex::new()),
            Box::new(NoOpReranker),
        )
    }
}

impl RelatedIdeasService {
    pub fn new(
        engine: Box<dyn SimilarityEngine>,
        index: Box<dyn EmbeddingIndex>,
        reranker: Box<dyn Reranker>,
    ) -> Self {
        Self {
            engine,
            index,
            reranker,
        }
    }

    /// Embed every idea and upsert it into the index.
    ///
    /// Ideas whose embedding fails are skipped with a warning rather
    /// than aborting the rebuild. Callable repeatedly; rebuilding with
    /// the same idea set is idempotent.
    pub fn rebuild_index(&mut self, ideas: &[Idea]) {
        let engine = &*self.engine;
        let embedded: Vec<(IdeaId, Vec<f32>)> = ideas
            .par_iter()
            .filter_map(|idea| match engine.embed(&idea.title, idea.body.as_deref()) {
                Ok(vector) => Some((idea.id.clone(), vector)),
                Err(err) => {
                    log::warn!("skipping idea {} during index rebuild: {err}", idea.id);
                    None
                }
            })
            .collect();

        for (id, vector) in embedded {
            self.index.upsert(id, vector);
        }

        log::debug!("index rebuilt, {} entries", self.index.len());
    }

    /// Number of ideas currently indexed.
    pub fn indexed_count(&self) -> usize {
        self.index.len()
    }

    /// Drop one idea from the index (e.g. after deletion, without a
    /// full rebuild).
    pub fn remove_from_index(&mut self, id: &IdeaId) {
        self.index.remove(id);
    }

    /// Compute related ideas for `target`.
    ///
    /// Pinned partners come first, resolved in `all_ideas` order.
    /// Suggestions are similarity-ranked candidates above `tau`,
    /// excluding the target itself, its pinned partners and any
    /// blacklisted partner, reordered by the reranker and truncated to
    /// `max_n`. `max_n` and `tau` are taken as given; user-facing
    /// clamping lives in `RelatedPreferences`.
    pub fn related(
        &self,
        target: &Idea,
        all_ideas: &[Idea],
        links: &[Link],
        blacklist: &HashSet<BlockedPair>,
        max_n: usize,
        tau: f32,
    ) -> RelatedResult {
        // Pinned partners of the target, in all_ideas order
        let pinned_ids: HashSet<IdeaId> = links
            .iter()
            .filter(|link| link.pinned)
            .filter_map(|link| link.partner_of(&target.id).cloned())
            .filter(|id| *id != target.id)
            .collect();

        let pinned: Vec<Idea> = all_ideas
            .iter()
            .filter(|idea| pinned_ids.contains(&idea.id))
            .cloned()
            .collect();

        // No usable query vector -> pinned-only result, not an error
        let query_vec = match self.engine.embed(&target.title, target.body.as_deref()) {
            Ok(vector) if !vector.is_empty() => vector,
            Ok(_) => {
                log::debug!("idea {} has no tokens to embed", target.id);
                return RelatedResult {
                    pinned,
                    suggested: vec![],
                };
            }
            Err(err) => {
                log::warn!("embedding failed for idea {}: {err}", target.id);
                return RelatedResult {
                    pinned,
                    suggested: vec![],
                };
            }
        };

        let by_id: HashMap<IdeaId, &Idea> = all_ideas
            .iter()
            .map(|idea| (idea.id.clone(), idea))
            .collect();

        // Over-fetch so the exclusion filters below still leave up to
        // max_n candidates.
        let similarity = |a: &[f32], b: &[f32]| self.engine.similarity(a, b);
        let candidates: Vec<IdeaId> = self
            .index
            .query(&query_vec, max_n * 2, tau, &similarity)
            .into_iter()
            .map(|(id, _score)| id)
            .filter(|id| {
                *id != target.id
                    && !pinned_ids.contains(id)
                    && !contains_pair(blacklist, &target.id, id)
                    && by_id.contains_key(id)
            })
            .collect();

        // Candidate display texts in candidate order
        let texts: Vec<String> = candidates
            .iter()
            .map(|id| by_id[id].display_text())
            .collect();

        let indices = match self.reranker.rerank(&target.display_text(), &texts, max_n) {
            Ok(indices) => indices,
            Err(err) => {
                log::warn!("reranker failed, keeping similarity order: {err}");
                (0..max_n.min(candidates.len())).collect()
            }
        };

        // Map indices back to ids; out-of-range and repeated indices
        // are dropped silently.
        let mut seen: HashSet<&IdeaId> = HashSet::new();
        let suggested: Vec<Idea> = indices
            .into_iter()
            .filter_map(|idx| candidates.get(idx))
            .filter(|id| seen.insert(*id))
            .map(|id| by_id[id].clone())
            .collect();

        RelatedResult { pinned, suggested }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::LinkKind;

    fn idea(id: &str, title: &str, body: &str) -> Idea {
        Idea {
            id: IdeaId::from(id),
            title: title.to_string(),
            body: Some(body.to_string()),
        }
    }

    fn service() -> RelatedIdeasService {
        RelatedIdeasService::default()
    }

    #[test]
    fn test_rebuild_index_counts_every_idea() {
        let ideas = vec![
            idea("a", "SwiftUI", "List Navigation"),
            idea("b", "UIKit", "TableView"),
        ];
        let mut svc = service();
        svc.rebuild_index(&ideas);
        assert_eq!(svc.indexed_count(), 2);
    }

    #[test]
    fn test_rebuild_index_is_idempotent() {
        let ideas = vec![
            idea("a", "SwiftUI", "List Navigation"),
            idea("b", "UIKit", "TableView"),
        ];
        let mut svc = service();
        svc.rebuild_index(&ideas);
        svc.rebuild_index(&ideas);
        assert_eq!(svc.indexed_count(), 2);
    }

    #[test]
    fn test_remove_from_index() {
        let ideas = vec![idea("a", "SwiftUI", "List Navigation")];
        let mut svc = service();
        svc.rebuild_index(&ideas);
        svc.remove_from_index(&IdeaId::from("a"));
        assert_eq!(svc.indexed_count(), 0);
    }

    #[test]
    fn test_related_excludes_self() {
        let ideas = vec![
            idea("a", "SwiftUI", "List Navigation"),
            idea("b", "SwiftUI", "List Navigation"),
        ];
        let mut svc = service();
        svc.rebuild_index(&ideas);

        let result = svc.related(&ideas[0], &ideas, &[], &HashSet::new(), 5, 0.0);
        assert!(!result.suggested.iter().any(|i| i.id == ideas[0].id));
        assert!(!result.pinned.iter().any(|i| i.id == ideas[0].id));
    }

    #[test]
    fn test_pinned_link_not_involving_target_is_ignored() {
        let ideas = vec![
            idea("a", "SwiftUI", "List Navigation"),
            idea("b", "UIKit", "TableView"),
            idea("c", "Gardening", "Plants care"),
        ];
        let mut svc = service();
        svc.rebuild_index(&ideas);

        // b<->c pinned; querying a must not list either as pinned
        let links = vec![Link::new(
            IdeaId::from("b"),
            IdeaId::from("c"),
            LinkKind::Manual,
            true,
        )];
        let result = svc.related(&ideas[0], &ideas, &links, &HashSet::new(), 5, 0.0);
        assert!(result.pinned.is_empty());
    }

    #[test]
    fn test_unindexed_target_gets_pinned_only() {
        let ideas = vec![
            idea("a", "SwiftUI", "List Navigation"),
            idea("b", "UIKit", "TableView"),
        ];
        let svc = service(); // index never built

        let links = vec![Link::new(
            IdeaId::from("a"),
            IdeaId::from("b"),
            LinkKind::Manual,
            true,
        )];
        let result = svc.related(&ideas[0], &ideas, &links, &HashSet::new(), 5, 0.0);
        assert_eq!(result.pinned.len(), 1);
        assert!(result.suggested.is_empty());
    }

    #[test]
    fn test_empty_title_and_body_returns_pinned_only() {
        let ideas = vec![
            idea("a", "", ""),
            idea("b", "UIKit", "TableView"),
        ];
        let mut svc = service();
        svc.rebuild_index(&ideas);

        let result = svc.related(&ideas[0], &ideas, &[], &HashSet::new(), 5, 0.0);
        assert!(result.suggested.is_empty());
    }

    #[test]
    fn test_stale_index_entry_is_not_suggested() {
        let all = vec![
            idea("a", "SwiftUI", "List Navigation"),
            idea("b", "SwiftUI", "List Navigation"),
        ];
        let mut svc = service();
        svc.rebuild_index(&all);

        // b was deleted from the store after the last rebuild
        let remaining = vec![all[0].clone()];
        let result = svc.related(&all[0], &remaining, &[], &HashSet::new(), 5, 0.0);
        assert!(result.suggested.is_empty());
    }
}

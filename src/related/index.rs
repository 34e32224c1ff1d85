//! In-memory vector index over idea embeddings.
//!
//! Linear scan with a caller-supplied similarity function. O(n) per
//! query over n stored vectors, which is the documented scalability
//! ceiling for personal-scale collections; there is no
//! approximate-nearest-neighbor structure behind it.

use std::collections::HashMap;

use crate::ideas::IdeaId;

/// Capability interface for an upsertable `id -> vector` store with
/// top-K nearest-neighbor query.
pub trait EmbeddingIndex: Send + Sync {
    /// Replace-or-insert. Vectors may have differing lengths and may
    /// be empty; the similarity function decides what that means.
    fn upsert(&mut self, id: IdeaId, vector: Vec<f32>);

    /// Delete if present; absent ids are not an error.
    fn remove(&mut self, id: &IdeaId);

    /// Score every stored vector with `similarity`, keep entries with
    /// `score >= threshold`, sort by score descending (ties broken by
    /// id ascending so output is reproducible), truncate to `top_k`.
    fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        threshold: f32,
        similarity: &dyn Fn(&[f32], &[f32]) -> f32,
    ) -> Vec<(IdeaId, f32)>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Baseline linear-scan index.
#[derive(Debug, Default)]
pub struct LinearIndex {
    entries: HashMap<IdeaId, Vec<f32>>,
}

impl LinearIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    pub fn contains(&self, id: &IdeaId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl EmbeddingIndex for LinearIndex {
    fn upsert(&mut self, id: IdeaId, vector: Vec<f32>) {
        self.entries.insert(id, vector);
    }

    fn remove(&mut self, id: &IdeaId) {
        self.entries.remove(id);
    }

    fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        threshold: f32,
        similarity: &dyn Fn(&[f32], &[f32]) -> f32,
    ) -> Vec<(IdeaId, f32)> {
        let mut scores: Vec<(IdeaId, f32)> = self
            .entries
            .iter()
            .filter_map(|(id, stored)| {
                let score = similarity(vector, stored);
                if score >= threshold {
                    Some((id.clone(), score))
                } else {
                    None
                }
            })
            .collect();

        scores.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });

        scores.truncate(top_k);

        scores
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

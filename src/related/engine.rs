//! Similarity engine: turns idea text into vectors and scores them.

use std::collections::BTreeMap;

use crate::related::tokenize::tokenize;

/// Default weight contributed by each title token
const DEFAULT_TITLE_WEIGHT: f32 = 0.7;
/// Default weight contributed by each body token
const DEFAULT_BODY_WEIGHT: f32 = 0.3;

/// Capability interface for embedding idea text and scoring vectors.
///
/// Implementations must be deterministic for identical inputs.
pub trait SimilarityEngine: Send + Sync {
    /// Compose idea text and embed to an L2-normalized vector.
    fn embed(&self, title: &str, body: Option<&str>) -> anyhow::Result<Vec<f32>>;

    /// Cosine similarity of two vectors, compared over the first
    /// `min(a.len(), b.len())` components. Returns 0.0 if either
    /// vector is empty or a norm is zero.
    fn similarity(&self, a: &[f32], b: &[f32]) -> f32;
}

/// Deterministic bag-of-words baseline.
///
/// Builds a weighted term-frequency map (title tokens weigh more than
/// body tokens, weights accumulate per occurrence), projects it to a
/// vector in lexicographic token order and L2-normalizes. The vector
/// length is the record's own vocabulary size: there is no shared
/// dimension space, and similarity truncates to the shorter operand.
/// Keeps embedding O(tokens-per-record) with no corpus-wide
/// dictionary; a fixed-dimension engine is a drop-in trait impl.
#[derive(Debug, Clone)]
pub struct BagOfWordsEngine {
    title_weight: f32,
    body_weight: f32,
}

impl Default for BagOfWordsEngine {
    fn default() -> Self {
        Self {
            title_weight: DEFAULT_TITLE_WEIGHT,
            body_weight: DEFAULT_BODY_WEIGHT,
        }
    }
}

impl BagOfWordsEngine {
    pub fn new(title_weight: f32, body_weight: f32) -> Self {
        Self {
            title_weight,
            body_weight,
        }
    }
}

impl SimilarityEngine for BagOfWordsEngine {
    fn embed(&self, title: &str, body: Option<&str>) -> anyhow::Result<Vec<f32>> {
        // BTreeMap keeps keys sorted, so reading the values off is the
        // lexicographic projection.
        let mut freq: BTreeMap<String, f32> = BTreeMap::new();
        for token in tokenize(title) {
            *freq.entry(token).or_insert(0.0) += self.title_weight;
        }
        if let Some(body) = body {
            for token in tokenize(body) {
                *freq.entry(token).or_insert(0.0) += self.body_weight;
            }
        }

        let mut vec: Vec<f32> = freq.into_values().collect();
        l2_normalize(&mut vec);
        Ok(vec)
    }

    fn similarity(&self, a: &[f32], b: &[f32]) -> f32 {
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        let count = a.len().min(b.len());
        let mut dot = 0.0f32;
        let mut norm_a = 0.0f32;
        let mut norm_b = 0.0f32;
        for i in 0..count {
            let x = a[i];
            let y = b[i];
            dot += x * y;
            norm_a += x * x;
            norm_b += y * y;
        }

        let denom = norm_a.sqrt() * norm_b.sqrt();
        if denom == 0.0 {
            0.0
        } else {
            dot / denom
        }
    }
}

/// Divide every component by the Euclidean norm; all-zero stays all-zero.
fn l2_normalize(vec: &mut [f32]) {
    let norm = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in vec.iter_mut() {
            *x /= norm;
        }
    }
}

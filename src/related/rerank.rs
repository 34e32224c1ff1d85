//! Candidate reranking.
//!
//! A reranker reorders suggestion candidates after similarity ranking.
//! The no-op baseline preserves order; `KeywordRrfReranker` fuses the
//! incoming similarity order with a keyword-overlap ranking using
//! Weighted Reciprocal Rank Fusion.

use std::cmp::Ordering;
use std::collections::HashSet;

use once_cell::sync::Lazy;

/// RRF constant (standard value from literature).
/// Higher k reduces the impact of high-ranking items.
const RRF_K: f32 = 60.0;

/// Default weight of the incoming similarity ranking in the fusion.
pub const DEFAULT_SEMANTIC_WEIGHT: f32 = 0.6;

/// Baseline text length for keyword-hit normalization (characters).
/// Bodies at or below this length get full weight.
const BODY_LENGTH_BASELINE: f32 = 100.0;

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "in", "on", "at",
        "to", "for", "of", "with", "by", "from", "as", "and", "or", "but", "not", "no", "so",
        "if", "then",
    ]
    .into_iter()
    .collect()
});

/// Capability interface for reordering a candidate list.
///
/// Returns indices into `candidates` (unique, in bounds, at most
/// `top_k` of them) in descending relevance. Implementations must not
/// mutate the candidate texts. Failures are tolerated by callers, who
/// fall back to the incoming order.
pub trait Reranker: Send + Sync {
    fn rerank(&self, query: &str, candidates: &[String], top_k: usize)
        -> anyhow::Result<Vec<usize>>;
}

/// Keeps the incoming order, truncated to `top_k`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpReranker;

impl Reranker for NoOpReranker {
    fn rerank(
        &self,
        _query: &str,
        candidates: &[String],
        top_k: usize,
    ) -> anyhow::Result<Vec<usize>> {
        Ok((0..top_k.min(candidates.len())).collect())
    }
}

/// Fuses the incoming similarity order with a keyword ranking.
///
/// Candidates are scored by stop-word-filtered query-term overlap
/// (first text line treated as title, worth more per hit; the rest is
/// body, length-normalized so long bodies gain no unfair surface
/// area). Both orders are merged with Weighted RRF:
///
///   score(i) = w * 1/(k + rank_sim(i)) + (1-w) * 1/(k + rank_kw(i))
#[derive(Debug, Clone)]
pub struct KeywordRrfReranker {
    semantic_weight: f32,
}

impl Default for KeywordRrfReranker {
    fn default() -> Self {
        Self {
            semantic_weight: DEFAULT_SEMANTIC_WEIGHT,
        }
    }
}

impl KeywordRrfReranker {
    pub fn new(semantic_weight: f32) -> Self {
        Self {
            semantic_weight: semantic_weight.clamp(0.0, 1.0),
        }
    }
}

impl Reranker for KeywordRrfReranker {
    fn rerank(
        &self,
        query: &str,
        candidates: &[String],
        top_k: usize,
    ) -> anyhow::Result<Vec<usize>> {
        let terms = query_terms(query);

        // Keyword ranking over candidate positions. Candidates with no
        // matching term take no part in the lexical leg.
        let mut lexical: Vec<(usize, usize, f32)> = candidates
            .iter()
            .enumerate()
            .filter_map(|(pos, text)| {
                let (matched_terms, total_hits) = count_matches(&terms, text);
                if matched_terms > 0 {
                    Some((pos, matched_terms, total_hits))
                } else {
                    None
                }
            })
            .collect();
        lexical.sort_by(|a, b| {
            b.1.cmp(&a.1)
                .then_with(|| b.2.partial_cmp(&a.2).unwrap_or(Ordering::Equal))
                .then_with(|| a.0.cmp(&b.0))
        });

        let sem_weight = self.semantic_weight;
        let kw_weight = 1.0 - sem_weight;

        // The incoming order is rank 1..n on the similarity leg.
        let mut fused: Vec<(usize, f32)> = (0..candidates.len())
            .map(|pos| (pos, sem_weight / (RRF_K + pos as f32 + 1.0)))
            .collect();
        for (rank, (pos, _, _)) in lexical.iter().enumerate() {
            fused[*pos].1 += kw_weight / (RRF_K + rank as f32 + 1.0);
        }

        fused.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });

        Ok(fused.into_iter().take(top_k).map(|(pos, _)| pos).collect())
    }
}

/// Tokenize the query into lowercase terms, dropping 1-char terms and
/// stop words.
fn query_terms(query: &str) -> Vec<String> {
    query
        .split(|c: char| !c.is_alphanumeric())
        .map(|s| s.to_lowercase())
        .filter(|s| s.len() > 1 && !STOP_WORDS.contains(s.as_str()))
        .collect()
}

/// Weight for body matches based on body length.
///
/// Logarithmic decay: full weight up to the baseline, then
/// 1 / (1 + ln(len / baseline)).
fn body_length_weight(len: usize) -> f32 {
    if len <= BODY_LENGTH_BASELINE as usize {
        return 1.0;
    }
    1.0 / (1.0 + (len as f32 / BODY_LENGTH_BASELINE).ln())
}

/// Count term matches against a candidate text whose first line is the
/// title and whose remainder is the body.
/// Returns (unique terms matched, weighted total hits).
fn count_matches(terms: &[String], text: &str) -> (usize, f32) {
    let (title, body) = match text.split_once('\n') {
        Some((title, body)) => (title, body),
        None => (text, ""),
    };

    let title_lower = title.to_lowercase();
    let body_lower = body.to_lowercase();
    let body_weight = body_length_weight(body.len());

    let mut matched_terms = 0;
    let mut total_hits: f32 = 0.0;

    for term in terms {
        let mut term_hits: f32 = 0.0;

        if title_lower.contains(term.as_str()) {
            term_hits += 2.0; // Title matches worth more
        }

        if !body_lower.is_empty() && body_lower.contains(term.as_str()) {
            term_hits += body_weight;
        }

        if term_hits > 0.0 {
            matched_terms += 1;
            total_hits += term_hits;
        }
    }

    (matched_terms, total_hits)
}

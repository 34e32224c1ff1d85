//! Text tokenization for embedding input.
//!
//! The same function runs at index-build time and at query time so
//! embeddings stay comparable.

/// Split text into lowercase tokens on any non-alphanumeric boundary.
///
/// Every non-empty token is kept; filtering (stop words, length) is
/// left to consumers with stricter needs.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .map(|s| s.to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

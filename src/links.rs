//! Pairwise relations between ideas: manual/auto links and blacklist
//! entries, both keyed by an order-independent pair identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::ideas::IdeaId;

/// Canonical unordered pair of idea ids.
///
/// The constructor normalizes to `(min, max)`, so `PairKey::new(a, b)`
/// and `PairKey::new(b, a)` are equal and hash identically. The raw
/// unordered inputs are never exposed for comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairKey {
    a: IdeaId,
    b: IdeaId,
}

impl PairKey {
    pub fn new(x: IdeaId, y: IdeaId) -> Self {
        if x <= y {
            Self { a: x, b: y }
        } else {
            Self { a: y, b: x }
        }
    }

    /// Canonical string key, `"{min}::{max}"`. Stable across input
    /// order, usable as a map key by external stores.
    pub fn key(&self) -> String {
        format!("{}::{}", self.a, self.b)
    }

    pub fn involves(&self, id: &IdeaId) -> bool {
        self.a == *id || self.b == *id
    }

    /// The other endpoint, if `id` is one of the two.
    pub fn partner_of(&self, id: &IdeaId) -> Option<&IdeaId> {
        if self.a == *id {
            Some(&self.b)
        } else if self.b == *id {
            Some(&self.a)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Auto,
    Manual,
}

/// A relation between two ideas. Pinned links force inclusion in the
/// pinned bucket of related results regardless of similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub pair: PairKey,
    pub kind: LinkKind,
    pub pinned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    pub fn new(a: IdeaId, b: IdeaId, kind: LinkKind, pinned: bool) -> Self {
        let now = Utc::now();
        Self {
            pair: PairKey::new(a, b),
            kind,
            pinned,
            score: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }

    pub fn involves(&self, id: &IdeaId) -> bool {
        self.pair.involves(id)
    }

    pub fn partner_of(&self, id: &IdeaId) -> Option<&IdeaId> {
        self.pair.partner_of(id)
    }
}

/// A user-excluded pair. Suppresses automatic suggestion in both
/// directions; does not affect pinned links.
///
/// Equality and hashing consider the pair only, so a
/// `HashSet<BlockedPair>` answers symmetric membership regardless of
/// when the entry was created.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct BlockedPair {
    pub pair: PairKey,
    pub created_at: DateTime<Utc>,
}

impl std::hash::Hash for BlockedPair {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.pair.hash(state)
    }
}

impl PartialEq for BlockedPair {
    fn eq(&self, other: &Self) -> bool {
        self.pair == other.pair
    }
}

impl BlockedPair {
    pub fn new(a: IdeaId, b: IdeaId) -> Self {
        Self {
            pair: PairKey::new(a, b),
            created_at: Utc::now(),
        }
    }
}

/// Symmetric membership test against a blacklist.
pub fn contains_pair(blacklist: &HashSet<BlockedPair>, a: &IdeaId, b: &IdeaId) -> bool {
    blacklist.contains(&BlockedPair::new(a.clone(), b.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> IdeaId {
        IdeaId::from(s)
    }

    #[test]
    fn pair_key_is_order_independent() {
        let ab = PairKey::new(id("aaa"), id("bbb"));
        let ba = PairKey::new(id("bbb"), id("aaa"));
        assert_eq!(ab, ba);
        assert_eq!(ab.key(), ba.key());
        assert_eq!(ab.key(), "aaa::bbb");
    }

    #[test]
    fn pair_partner_lookup() {
        let pair = PairKey::new(id("x"), id("y"));
        assert_eq!(pair.partner_of(&id("x")), Some(&id("y")));
        assert_eq!(pair.partner_of(&id("y")), Some(&id("x")));
        assert_eq!(pair.partner_of(&id("z")), None);
        assert!(pair.involves(&id("x")));
        assert!(!pair.involves(&id("z")));
    }

    #[test]
    fn link_normalizes_endpoints() {
        let link = Link::new(id("bbb"), id("aaa"), LinkKind::Manual, true);
        assert_eq!(link.pair.key(), "aaa::bbb");
        assert!(link.pinned);
        assert_eq!(link.partner_of(&id("aaa")), Some(&id("bbb")));
    }

    #[test]
    fn blacklist_membership_is_symmetric() {
        let mut blacklist = HashSet::new();
        blacklist.insert(BlockedPair::new(id("aaa"), id("bbb")));

        assert!(contains_pair(&blacklist, &id("aaa"), &id("bbb")));
        assert!(contains_pair(&blacklist, &id("bbb"), &id("aaa")));
        assert!(!contains_pair(&blacklist, &id("aaa"), &id("ccc")));
    }

    #[test]
    fn blocked_pair_ignores_timestamp() {
        let one = BlockedPair::new(id("aaa"), id("bbb"));
        let mut two = BlockedPair::new(id("bbb"), id("aaa"));
        two.created_at = two.created_at + chrono::Duration::days(1);
        assert_eq!(one, two);
    }

    #[test]
    fn link_serde_round_trip() {
        let link = Link::new(id("aaa"), id("bbb"), LinkKind::Auto, false).with_score(0.42);
        let json = serde_json::to_string(&link).unwrap();
        let back: Link = serde_json::from_str(&json).unwrap();
        assert_eq!(back.pair, link.pair);
        assert_eq!(back.kind, LinkKind::Auto);
        assert_eq!(back.score, Some(0.42));
    }
}

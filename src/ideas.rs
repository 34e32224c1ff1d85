use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;
use std::{fmt::Display, ops::Deref};

/// Opaque identifier for an idea record.
///
/// Backed by a ULID string, so ids sort lexicographically in creation
/// order and admit a total order (used for canonical pair ordering and
/// deterministic tie-breaks).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
pub struct IdeaId(String);

impl Display for IdeaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for IdeaId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(IdeaId(s.to_string()))
    }
}

impl Deref for IdeaId {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&str> for IdeaId {
    fn from(fr: &str) -> Self {
        IdeaId(fr.to_string())
    }
}

impl From<String> for IdeaId {
    fn from(fr: String) -> Self {
        IdeaId(fr)
    }
}

impl From<IdeaId> for String {
    fn from(fr: IdeaId) -> Self {
        fr.0
    }
}

impl IdeaId {
    #[inline]
    pub fn new() -> IdeaId {
        IdeaId(rusty_ulid::generate_ulid_string())
    }
}

impl Default for IdeaId {
    fn default() -> Self {
        Self::new()
    }
}

/// A user-authored record: a title plus an optional body.
///
/// The record store owns the full lifecycle; this crate only reads
/// title and body. Identity is the id alone.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Idea {
    pub id: IdeaId,

    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl std::hash::Hash for Idea {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

impl PartialEq for Idea {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Idea {
    pub fn new(title: impl Into<String>, body: Option<String>) -> Self {
        Self {
            id: IdeaId::new(),
            title: title.into(),
            body,
        }
    }

    /// Title and body joined on one newline, for reranker input and
    /// other display-oriented consumers.
    pub fn display_text(&self) -> String {
        match &self.body {
            Some(body) => format!("{}\n{}", self.title, body),
            None => self.title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ids_are_unique() {
        let a = IdeaId::new();
        let b = IdeaId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn id_round_trips_through_string() {
        let id = IdeaId::new();
        let s: String = id.clone().into();
        assert_eq!(IdeaId::from(s), id);
    }

    #[test]
    fn idea_identity_is_the_id() {
        let mut a = Idea::new("Title", None);
        let b = Idea {
            id: a.id.clone(),
            title: "Other title".to_string(),
            body: Some("body".to_string()),
        };
        assert_eq!(a, b);

        a.id = IdeaId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn display_text_joins_title_and_body() {
        let idea = Idea::new("Title", Some("Body text".to_string()));
        assert_eq!(idea.display_text(), "Title\nBody text");

        let bare = Idea::new("Title", None);
        assert_eq!(bare.display_text(), "Title");
    }
}

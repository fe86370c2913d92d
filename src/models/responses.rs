use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::models::domain::Match;

/// Descriptive reason a candidate was surfaced
///
/// Serialized as its display label so persisted views read the same as the
/// screen text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MatchTag {
    ExactArea,
    NearArea,
    SameTimeSlot,
    NearTimeSlot,
    /// Shared training category, labelled with the category itself
    Category(String),
}

impl MatchTag {
    pub fn label(&self) -> &str {
        match self {
            MatchTag::ExactArea => "同じエリア",
            MatchTag::NearArea => "近いエリア",
            MatchTag::SameTimeSlot => "同時間帯",
            MatchTag::NearTimeSlot => "近い時間帯",
            MatchTag::Category(name) => name,
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label {
            "同じエリア" => MatchTag::ExactArea,
            "近いエリア" => MatchTag::NearArea,
            "同時間帯" => MatchTag::SameTimeSlot,
            "近い時間帯" => MatchTag::NearTimeSlot,
            other => MatchTag::Category(other.to_string()),
        }
    }
}

impl fmt::Display for MatchTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for MatchTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for MatchTag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(MatchTag::from_label(&label))
    }
}

/// Candidate together with the tags derived for the acting user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggedMatch {
    #[serde(flatten)]
    pub candidate: Match,
    pub common_tags: Vec<MatchTag>,
}

/// One row of the compatibility detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchPoint {
    pub label: &'static str,
    pub matched: bool,
}

/// Compatibility narrative for a tagged match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibilityBreakdown {
    pub score: u8,
    pub matched: Vec<MatchPoint>,
    pub near: Vec<MatchPoint>,
}

impl CompatibilityBreakdown {
    /// Number of exact-match points satisfied
    pub fn matched_count(&self) -> usize {
        self.matched.iter().filter(|p| p.matched).count()
    }
}

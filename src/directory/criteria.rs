//! Filter and sort criteria for the visible candidate list.

#![allow(missing_docs)]

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::locale::catalog::keys;

/// Party grouping offered as quick filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyFilter {
    /// No party restriction.
    #[default]
    All,
    /// Indian National Congress and allied "Congress" parties.
    Inc,
    /// Bharatiya Janata Party.
    Bjp,
}

impl PartyFilter {
    /// Filters in the order they are offered.
    pub const ALL: [Self; 3] = [Self::All, Self::Inc, Self::Bjp];

    /// Resolve a filter tag. Unknown tags pass everything through.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "inc" | "congress" => Self::Inc,
            "bjp" => Self::Bjp,
            _ => Self::All,
        }
    }

    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Inc => "inc",
            Self::Bjp => "bjp",
        }
    }

    /// Lower-case substring a party name must contain to match.
    #[must_use]
    pub const fn needle(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Inc => Some("congress"),
            Self::Bjp => Some("bjp"),
        }
    }

    /// Whether `party` passes this filter (case-insensitive).
    #[must_use]
    pub fn matches(self, party: &str) -> bool {
        self.needle()
            .is_none_or(|needle| party.to_lowercase().contains(needle))
    }

    /// Group a party name falls into, for badge styling.
    #[must_use]
    pub fn classify(party: &str) -> Option<Self> {
        [Self::Inc, Self::Bjp]
            .into_iter()
            .find(|group| group.matches(party))
    }

    /// Catalog key of the filter chip label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::All => keys::ALL,
            Self::Inc => keys::INC,
            Self::Bjp => keys::BJP,
        }
    }
}

impl fmt::Display for PartyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Keep the filtered order.
    #[default]
    Relevance,
    /// Highest declared assets first.
    AssetsDesc,
    /// Lowest declared assets first.
    AssetsAsc,
    /// Alphabetical by name.
    NameAsc,
}

impl SortKey {
    /// Sort options in the order they are offered.
    pub const ALL: [Self; 4] = [
        Self::Relevance,
        Self::AssetsDesc,
        Self::AssetsAsc,
        Self::NameAsc,
    ];

    /// Resolve a sort tag; accepts both `assets_desc` and `assets-descending` spellings.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "relevance" => Some(Self::Relevance),
            "assets_desc" | "assets_descending" => Some(Self::AssetsDesc),
            "assets_asc" | "assets_ascending" => Some(Self::AssetsAsc),
            "name_asc" | "name_ascending" | "name" => Some(Self::NameAsc),
            _ => None,
        }
    }

    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::AssetsDesc => "assets_desc",
            Self::AssetsAsc => "assets_asc",
            Self::NameAsc => "name_asc",
        }
    }

    /// Catalog key of the option label.
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Relevance => keys::RELEVANCE,
            Self::AssetsDesc => keys::ASSETS_HIGH_TO_LOW,
            Self::AssetsAsc => keys::ASSETS_LOW_TO_HIGH,
            Self::NameAsc => keys::NAME_A_Z,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Everything that shapes the visible list. Session-local, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    /// Free text, matched case-insensitively against name, party, constituency.
    pub search_text: String,
    pub party_filter: PartyFilter,
    pub sort_key: SortKey,
}

impl Criteria {
    /// Lower-cased, trimmed search text; `None` when there is nothing to match.
    #[must_use]
    pub fn normalized_query(&self) -> Option<String> {
        let q = self.search_text.trim();
        (!q.is_empty()).then(|| q.to_lowercase())
    }

    /// Whether these criteria leave the collection unchanged.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.normalized_query().is_none()
            && self.party_filter == PartyFilter::All
            && self.sort_key == SortKey::Relevance
    }
}

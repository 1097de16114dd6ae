//! Core data models for babynames
//!
//! These structures represent the normalized, deterministic output of one
//! extraction: a year slot followed by name/rank entries sorted by name.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;

/// A rank exactly as written in the report
///
/// The digit string is kept verbatim (`"007"` stays `"007"`). Ordering is
/// numeric and works for any number of digits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Rank(String);

impl Rank {
    /// Accepts a non-empty run of ASCII digits
    pub fn parse(digits: &str) -> Option<Self> {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(digits.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare by numeric value: `"9" < "10"`, `"007" == "7"`
    pub fn numeric_cmp(&self, other: &Rank) -> Ordering {
        let lhs = self.0.trim_start_matches('0');
        let rhs = other.0.trim_start_matches('0');
        lhs.len().cmp(&rhs.len()).then_with(|| lhs.cmp(rhs))
    }
}

impl From<u32> for Rank {
    fn from(rank: u32) -> Self {
        Self(rank.to_string())
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A name together with the best (lowest) rank observed for it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NameRank {
    pub name: String,
    pub rank: Rank,
}

impl NameRank {
    pub fn new(name: impl Into<String>, rank: u32) -> Self {
        Self {
            name: name.into(),
            rank: Rank::from(rank),
        }
    }
}

impl fmt::Display for NameRank {
    /// Name and rank are concatenated with no separator ("Michael1")
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.rank)
    }
}

/// Result of extracting a single document
///
/// `names` is sorted ascending by name and holds each name once.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Summary {
    /// Four-digit year from the "Popularity in" heading, if one was found
    pub year: Option<String>,
    pub names: Vec<NameRank>,
}

impl Summary {
    /// The flat result sequence: year slot (empty when absent), then one
    /// `name+rank` string per name.
    pub fn entries(&self) -> Vec<String> {
        let mut entries = Vec::with_capacity(self.names.len() + 1);
        entries.push(self.year.clone().unwrap_or_default());
        entries.extend(self.names.iter().map(NameRank::to_string));
        entries
    }

    /// Look up the best rank recorded for a name, as written in the report
    pub fn rank_of(&self, name: &str) -> Option<&str> {
        self.names
            .binary_search_by(|entry| entry.name.as_str().cmp(name))
            .ok()
            .map(|idx| self.names[idx].rank.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.names.is_empty()
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.entries().join("\n"))
    }
}

/// A summary paired with the file it came from, used for JSON batch output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub summary: Summary,
}

//! Instrument code → label lookup table.
//!
//! Catalog instrumentation fields use compact codes (`cl`, `hrn`, `vln-1`)
//! while search facets and display strings use human-readable labels
//! (`clarinet`, `horn`, `first violin`). [`LabelTable`] holds that mapping.
//! It is built once, before row processing starts, and is read-only for the
//! lifetime of the process; codes absent from the table pass through
//! verbatim as their own label.

#![warn(missing_docs)]

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Error loading a [`LabelTable`] from JSON.
#[derive(Debug, thiserror::Error)]
pub enum LabelTableError {
    /// The input was not a flat JSON object of string code → string label.
    #[error("invalid label table JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Immutable mapping from lowercase instrument code to human-readable label.
///
/// Lookup is pass-through: a code with no entry is its own label. This keeps
/// the facet pipeline failure-free; callers surface unknown codes as
/// data-quality warnings, not errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct LabelTable {
    labels: HashMap<String, String>,
}

impl LabelTable {
    /// An empty table: every code passes through as its own label.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from `(code, label)` pairs.
    ///
    /// Codes are lowercased on insert; the parser lowercases the field text,
    /// so lookups are always lowercase-to-lowercase. Later pairs overwrite
    /// earlier ones for the same code.
    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let labels = pairs
            .into_iter()
            .map(|(code, label)| (code.into().to_lowercase(), label.into()))
            .collect();
        Self { labels }
    }

    /// Load a table from a flat JSON object, e.g. `{"cl": "clarinet"}`.
    pub fn from_json(json: &str) -> Result<Self, LabelTableError> {
        let raw: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(Self::from_pairs(raw))
    }

    /// Resolve a code to its label, passing unknown codes through verbatim.
    ///
    /// Pure and idempotent: `label(label(code))` can differ from
    /// `label(code)` only if a label is itself a code, which the catalog
    /// vocabulary avoids; repeated lookup of the same code is always
    /// identical.
    pub fn label<'a>(&'a self, code: &'a str) -> &'a str {
        self.labels.get(code).map_or(code, String::as_str)
    }

    /// Whether the table has an entry for `code`.
    pub fn contains(&self, code: &str) -> bool {
        self.labels.contains_key(code)
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

//! Shared helpers for the core integration tests.

use instrumentation_core::{FacetResult, LabelTable, generate, parse_str};

/// A small label table covering the codes used across the test suite.
pub fn table() -> LabelTable {
    LabelTable::from_pairs([
        ("cl", "clarinet"),
        ("ob", "oboe"),
        ("hrn", "horn"),
        ("fl", "flute"),
        ("vln", "violin"),
    ])
}

/// Parse and generate in one step.
pub fn facets(input: &str, table: &LabelTable) -> FacetResult {
    generate(&parse_str(input).parsed, table)
}

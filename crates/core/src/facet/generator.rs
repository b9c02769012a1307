use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::grammar::ast::{Count, ParsedInstrumentation};
use crate::grammar::diag::{Diagnostic, codes};
use instrumentation_labels::LabelTable;

/// Result of facet generation over one parsed instrumentation sequence.
#[derive(Debug, serde::Serialize)]
pub struct FacetResult {
    /// Ordered, deduplicated instrument labels (facet membership). Order is
    /// first-seen across the sorted group sequence.
    pub ids: Vec<String>,
    /// Count-qualified facet keys, one per reachable non-zero total per
    /// instrument. Duplicate collapse is a hard invariant; iteration order
    /// is lexicographic but not significant to callers.
    pub counted_keys: BTreeSet<String>,
    /// One human-readable string per alternative group, in processed order.
    pub alt_displays: Vec<String>,
    /// Advisory diagnostics (one warning per distinct unknown code).
    pub diagnostics: Vec<Diagnostic>,
}

/// Generate facet ids, counted keys, and per-group display strings.
///
/// Walks the groups in their (already sorted) order; performs no reordering,
/// so re-running on the same input yields identical outputs. Never fails:
/// codes missing from `table` pass through as their own label, with a
/// warning diagnostic.
///
/// The accumulation is the combinatorial core: an instrument's total
/// requirement across independent AND-groups is the sum of whichever
/// alternative is chosen in each group. Counts within one group are mutually
/// exclusive and never sum with each other; each sums against the totals
/// reachable before the group. When a group offers a true alternative
/// (more than one distinct code), a synthetic zero count models "this
/// instrument absent when another alternative is picked".
pub fn generate(parsed: &ParsedInstrumentation, table: &LabelTable) -> FacetResult {
    // Per-call accumulators; nothing escapes or is shared across calls.
    let mut ids: Vec<String> = Vec::new();
    let mut seen: Vec<String> = Vec::new();
    let mut totals: HashMap<String, BTreeSet<Count>> = HashMap::new();
    let mut alt_displays: Vec<String> = Vec::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    for group in &parsed.groups {
        let codes_in_group = group.distinct_codes();
        let alternative = codes_in_group.len() > 1;
        let mut fragments: Vec<String> = Vec::new();

        for code in codes_in_group {
            let label = table.label(code);
            if !table.contains(code) && !seen.iter().any(|c| c == code) {
                diagnostics.push(
                    Diagnostic::warn(
                        codes::FACET_UNKNOWN_CODE,
                        format!(
                            "instrument code {code:?} has no label table entry; \
                             using the code as its label"
                        ),
                        None,
                    )
                    .with_context(BTreeMap::from([("code".into(), code.into())])),
                );
            }
            if !ids.iter().any(|l| l == label) {
                ids.push(label.to_string());
            }
            if !seen.iter().any(|c| c == code) {
                seen.push(code.to_string());
            }

            let mut counts = group.counts_for(code);
            if alternative {
                counts.push(Count::Num(0));
            }

            // Snapshot of the totals reachable before this group.
            // Alternatives within the group combine with these, never with
            // each other.
            let prior = totals.get(code).cloned().unwrap_or_default();
            let reachable = totals.entry(code.to_string()).or_default();
            for count in counts {
                if !count.is_zero() {
                    fragments.push(display_fragment(&count, label));
                }
                match count {
                    Count::Num(n) if !prior.is_empty() => {
                        for base in prior.iter().filter_map(Count::as_num) {
                            reachable.insert(Count::Num(base + n));
                        }
                    }
                    // First occurrence of the code, or a marker: insert
                    // directly, no summing.
                    other => {
                        reachable.insert(other);
                    }
                }
            }
        }

        alt_displays.push(fragments.join(" OR "));
    }

    let mut counted_keys: BTreeSet<String> = BTreeSet::new();
    for code in &seen {
        let label = table.label(code);
        let Some(values) = totals.get(code) else {
            continue;
        };
        for value in values {
            if value.is_zero() {
                continue;
            }
            counted_keys.insert(counted_key(value, label));
        }
    }

    FacetResult {
        ids,
        counted_keys,
        alt_displays,
        diagnostics,
    }
}

// ─── Rendering ──────────────────────────────────────────────────────────────

/// Human fragment for one alternative: `"3 clarinet"` or `"horn [optional]"`.
fn display_fragment(count: &Count, label: &str) -> String {
    match count {
        Count::Num(n) => format!("{n} {label}"),
        marker => format!("{label} [{marker}]"),
    }
}

/// Counted facet key: `"<label><padded-or-marker>::<display>"`. Numeric
/// totals are zero-padded to 3 digits so keys sort numerically as text.
fn counted_key(value: &Count, label: &str) -> String {
    match value {
        Count::Num(n) => format!("{label}{n:03}::{n} {label}"),
        marker => format!("{label}{marker}::{label} [{marker}]"),
    }
}

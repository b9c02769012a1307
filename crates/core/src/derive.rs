//! Row-pipeline entry point: raw field in, three output column values out.

use serde::Serialize;

use crate::facet::generator::generate;
use crate::grammar::diag::Diagnostic;
use crate::grammar::parser::{ParseResult, parse_str};
use instrumentation_labels::LabelTable;

/// The three normalized output column values derived from one
/// instrumentation field. Each is its output collection joined with `,`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InstrumentationFields {
    /// `instrumentation_dictionary` — joined facet ids.
    pub dictionary: String,
    /// `instrumentation_dictionary_full` — joined counted keys.
    pub dictionary_full: String,
    /// `instrumentation_dictionary_full_with_alt` — joined per-group
    /// display strings.
    pub dictionary_full_with_alt: String,
}

/// Result of deriving the output fields for one catalog row.
#[derive(Debug, Serialize)]
pub struct DeriveResult {
    /// The three output column values.
    pub fields: InstrumentationFields,
    /// Advisory diagnostics from both stages, parser first.
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse a raw instrumentation field and generate the three output column
/// values in one call.
///
/// Pure and stateless apart from the read-only `table`; safe to call
/// concurrently per row from multiple workers with no coordination. Always
/// returns well-formed (possibly empty) fields — an empty input yields
/// three empty strings.
pub fn derive_fields(raw: &str, table: &LabelTable) -> DeriveResult {
    let ParseResult {
        parsed,
        mut diagnostics,
    } = parse_str(raw);

    let facets = generate(&parsed, table);
    diagnostics.extend(facets.diagnostics);

    let fields = InstrumentationFields {
        dictionary: facets.ids.join(","),
        dictionary_full: facets
            .counted_keys
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(","),
        dictionary_full_with_alt: facets.alt_displays.join(","),
    };

    DeriveResult {
        fields,
        diagnostics,
    }
}

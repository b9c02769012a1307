//! Diagnostic ID constants.
//!
//! Use these instead of string literals to get compile-time typo detection
//! and IDE autocomplete.

/// A parenthesized qualifier did not parse as a count, `opt`, or `ens` and
/// was folded back into the instrument code as literal text.
pub const PARSE_QUALIFIER_FOLDED: &str = "INS1101";

/// The instrumentation field was empty after comma-splitting and trimming.
pub const PARSE_EMPTY_FIELD: &str = "INS1102";

/// An instrument code was not found in the label table; the raw code is
/// used as its own label.
pub const FACET_UNKNOWN_CODE: &str = "INS2101";

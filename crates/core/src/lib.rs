//! Instrumentation facet core library.
//!
//! Turns a catalog's raw instrumentation field — a compact mini-language of
//! counts, optional markers, and `|`-separated alternatives — into the three
//! normalized representations used for search faceting and display. The main
//! entry points are [`parse_str`] for parsing, [`generate`] for facet
//! generation, and [`derive_fields`] for the combined row-pipeline call.
//!
//! Both stages are pure: no I/O, no shared mutable state, and no failure
//! path. Malformed input degrades (documented per case) instead of being
//! rejected, and anomalies are reported as advisory [`Diagnostic`]s.

#![warn(missing_docs)]

/// Caller-facing derivation of the three output field strings.
pub mod derive;
/// Facet and display generation from a parsed instrumentation sequence.
pub mod facet;
/// Instrumentation mini-language: AST, parser, and serialization helpers.
pub mod grammar;

// ── Convenience re-exports ──────────────────────────────────────────────────
// Flat imports for the most common entry points. The full module paths
// remain available for less common types.

// Parser
pub use grammar::parser::{ParseResult, parse_str};

// AST
pub use grammar::ast::{AlternativeGroup, Count, ParsedInstrumentation, Term};

// Facet generator
pub use facet::generator::{FacetResult, generate};

// Derivation
pub use derive::{DeriveResult, InstrumentationFields, derive_fields};

// Diagnostics (re-exported from the diagnostics crate)
pub use grammar::diag::{Diagnostic, Severity, Span, codes};

// Label table (re-exported from the labels crate)
pub use instrumentation_labels::LabelTable;

// Serialization helpers
pub use grammar::dump::to_pretty_json;

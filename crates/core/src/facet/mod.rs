//! Facet and display generation.
//!
//! The second stage of the derivation: walks a sorted
//! [`ParsedInstrumentation`](crate::ParsedInstrumentation) against the label
//! table and accumulates, per instrument, every combinatorially reachable
//! total count across alternative groups.

/// The facet/display generator and its result type.
pub mod generator;

/// Instrumentation mini-language abstract syntax tree types.
pub mod ast;
/// Re-exports from the diagnostics crate.
pub mod diag;
/// JSON serialization helpers for parsed instrumentation.
pub mod dump;
/// Mini-language parser — converts a raw field string into an AST.
pub mod parser;

use super::ast::ParsedInstrumentation;

/// Serialize a parsed instrumentation sequence to a pretty-printed JSON string.
pub fn to_pretty_json(parsed: &ParsedInstrumentation) -> String {
    serde_json::to_string_pretty(parsed).expect("ParsedInstrumentation serialization cannot fail")
}

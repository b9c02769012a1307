use std::collections::BTreeMap;

use super::ast::{AlternativeGroup, Count, ParsedInstrumentation, Term};
use super::diag::{Diagnostic, Span, codes};

/// Result of parsing an instrumentation field string.
#[derive(Debug, serde::Serialize)]
pub struct ParseResult {
    /// The parsed AND-sequence of alternative groups, sorted
    /// single-term-first.
    pub parsed: ParsedInstrumentation,
    /// Advisory diagnostics produced during parsing. Never contains an
    /// error: the parser does not reject input.
    pub diagnostics: Vec<Diagnostic>,
}

// ─── Public API ─────────────────────────────────────────────────────────────

/// Parse a raw instrumentation field into a [`ParsedInstrumentation`].
///
/// The input is lowercased (codes are case-insensitive), split on `,` into
/// segments (empty segments are dropped, which absorbs trailing and doubled
/// commas), and each segment splits on `|` into the terms of one
/// [`AlternativeGroup`]. Groups are then stably sorted so single-term groups
/// come first.
///
/// Malformed input degrades instead of failing: a parenthesized qualifier
/// that is not a non-negative integer, `opt`, or `ens` is folded back into
/// the code as literal text (count 1), with an informational diagnostic.
/// Diagnostic spans index the lowercased text.
pub fn parse_str(input: &str) -> ParseResult {
    let lowered = input.to_lowercase();
    let mut groups: Vec<AlternativeGroup> = Vec::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    let mut seg_start = 0usize;
    for segment in lowered.split(',') {
        let start = seg_start;
        seg_start += segment.len() + 1;
        if segment.trim().is_empty() {
            continue;
        }

        let mut terms: Vec<Term> = Vec::new();
        let mut term_start = start;
        for raw_term in segment.split('|') {
            let at = term_start;
            term_start += raw_term.len() + 1;
            let trimmed = raw_term.trim();
            if trimmed.is_empty() {
                continue;
            }
            let span = trimmed_span(raw_term, at);
            terms.push(parse_term(trimmed, span, &mut diagnostics));
        }
        if !terms.is_empty() {
            groups.push(AlternativeGroup { terms });
        }
    }

    if groups.is_empty() {
        let span = if lowered.is_empty() {
            Span::empty(0)
        } else {
            Span::new(0, lowered.len())
        };
        diagnostics.push(Diagnostic::info(
            codes::PARSE_EMPTY_FIELD,
            "no instrumentation terms found",
            Some(span),
        ));
    }

    let mut parsed = ParsedInstrumentation { groups };
    parsed.sort_single_term_first();

    ParseResult {
        parsed,
        diagnostics,
    }
}

// ─── Term parsing ───────────────────────────────────────────────────────────

/// Parse one trimmed, lowercased term.
///
/// Grammar: `<code>` or `<code> ( <qualifier> )` with arbitrary spacing
/// around and inside the parens. When the qualifier fails to resolve, the
/// whole term (parens included) becomes the code with count 1.
fn parse_term(trimmed: &str, span: Span, diagnostics: &mut Vec<Diagnostic>) -> Term {
    if let Some(open) = trimmed.find('(')
        && trimmed.ends_with(')')
    {
        let code = trimmed[..open].trim_end();
        let qualifier = trimmed[open + 1..trimmed.len() - 1].trim();
        if is_code_token(code)
            && let Some(count) = parse_qualifier(qualifier)
        {
            return Term {
                code: code.to_string(),
                count,
            };
        }
        diagnostics.push(
            Diagnostic::info(
                codes::PARSE_QUALIFIER_FOLDED,
                format!(
                    "qualifier {qualifier:?} is not a count, 'opt', or 'ens'; \
                     treating the whole term as a literal code"
                ),
                Some(span),
            )
            .with_context(BTreeMap::from([
                ("qualifier".into(), qualifier.into()),
                ("code".into(), trimmed.into()),
            ])),
        );
        return Term {
            code: trimmed.to_string(),
            count: Count::Num(1),
        };
    }

    // Bare code (also covers an unclosed paren): count defaults to 1.
    Term {
        code: trimmed.to_string(),
        count: Count::Num(1),
    }
}

/// Resolve the text inside a term's parentheses.
///
/// Counts are non-negative decimal integers; an integer that overflows `u32`
/// is treated as unresolvable, like any other malformed qualifier.
fn parse_qualifier(qualifier: &str) -> Option<Count> {
    match qualifier {
        "opt" => Some(Count::Optional),
        "ens" => Some(Count::Ensemble),
        _ if !qualifier.is_empty() && qualifier.bytes().all(|b| b.is_ascii_digit()) => {
            qualifier.parse().ok().map(Count::Num)
        }
        _ => None,
    }
}

/// Whether `code` is a plain code token: a non-empty run of word characters
/// and hyphens.
fn is_code_token(code: &str) -> bool {
    !code.is_empty()
        && code
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// Span of `raw` with leading/trailing whitespace excluded, where `raw`
/// begins at byte offset `start` of the lowercased input.
fn trimmed_span(raw: &str, start: usize) -> Span {
    let lead = raw.len() - raw.trim_start().len();
    let trail = raw.len() - raw.trim_end().len();
    if lead + trail >= raw.len() {
        Span::empty(start + lead)
    } else {
        Span::new(start + lead, start + raw.len() - trail)
    }
}

//! Tests for the instrumentation mini-language parser.
//!
//! Covers: segment and alternative splitting, qualifier resolution,
//! fold-back of malformed qualifiers, the single-term-first ordering
//! invariant, span tracking, and degradation on odd input.
//!
//! Facet-generation tests live in `generator.rs`.

use instrumentation_core::grammar::parser::parse_str;
use instrumentation_core::{Count, Severity, Term, codes};

fn term(code: &str, count: Count) -> Term {
    Term {
        code: code.to_string(),
        count,
    }
}

/// Flatten the parsed groups into `Vec<Vec<Term>>` for compact assertions.
fn groups_of(input: &str) -> Vec<Vec<Term>> {
    parse_str(input)
        .parsed
        .groups
        .into_iter()
        .map(|g| g.terms)
        .collect()
}

// ─── 1. Basic parsing ───────────────────────────────────────────────────────

#[test]
fn empty_input_no_groups() {
    let result = parse_str("");
    assert!(
        result.parsed.is_empty(),
        "empty input should produce no groups"
    );
    assert!(
        result
            .diagnostics
            .iter()
            .any(|d| d.id == codes::PARSE_EMPTY_FIELD),
        "should emit empty-field diagnostic"
    );
}

#[test]
fn commas_and_whitespace_only() {
    for input in [",", ",,,", "  ,  , ", "   "] {
        let result = parse_str(input);
        assert!(
            result.parsed.is_empty(),
            "input {input:?} should produce no groups"
        );
        assert!(
            result
                .diagnostics
                .iter()
                .any(|d| d.id == codes::PARSE_EMPTY_FIELD),
            "input {input:?} should emit empty-field diagnostic"
        );
    }
}

#[test]
fn single_bare_code() {
    assert_eq!(groups_of("cl"), vec![vec![term("cl", Count::Num(1))]]);
}

#[test]
fn codes_are_lowercased() {
    assert_eq!(
        groups_of("CL, Hrn-Bsst"),
        vec![
            vec![term("cl", Count::Num(1))],
            vec![term("hrn-bsst", Count::Num(1))],
        ]
    );
}

#[test]
fn trailing_and_doubled_commas_dropped() {
    assert_eq!(
        groups_of("cl,, ob,"),
        vec![
            vec![term("cl", Count::Num(1))],
            vec![term("ob", Count::Num(1))],
        ]
    );
}

#[test]
fn no_diagnostics_on_clean_input() {
    let result = parse_str("cl(2), ob, hrn(opt)");
    assert!(
        result.diagnostics.is_empty(),
        "clean input should parse without diagnostics: {:?}",
        result.diagnostics
    );
}

// ─── 2. Qualifiers ──────────────────────────────────────────────────────────

#[test]
fn numeric_qualifier() {
    assert_eq!(groups_of("cl(4)"), vec![vec![term("cl", Count::Num(4))]]);
}

#[test]
fn numeric_qualifier_with_spacing() {
    assert_eq!(
        groups_of("  cl  (  4  )  "),
        vec![vec![term("cl", Count::Num(4))]]
    );
}

#[test]
fn opt_qualifier_with_spacing() {
    assert_eq!(
        groups_of("foo ( opt )"),
        vec![vec![term("foo", Count::Optional)]]
    );
}

#[test]
fn ens_qualifier_trailing_space() {
    assert_eq!(
        groups_of("foo(ens) "),
        vec![vec![term("foo", Count::Ensemble)]]
    );
}

#[test]
fn zero_qualifier_accepted() {
    assert_eq!(groups_of("cl(0)"), vec![vec![term("cl", Count::Num(0))]]);
}

// ─── 3. Malformed qualifiers fold into the code ─────────────────────────────

#[test]
fn bad_qualifier_folds_into_code() {
    let result = parse_str("foo (bad)");
    assert_eq!(
        result.parsed.groups[0].terms,
        vec![term("foo (bad)", Count::Num(1))],
        "malformed qualifier should fold the whole term into the code"
    );
    let diag = result
        .diagnostics
        .iter()
        .find(|d| d.id == codes::PARSE_QUALIFIER_FOLDED)
        .expect("should emit fold diagnostic");
    assert_eq!(
        diag.severity,
        Severity::Info,
        "fold diagnostic is advisory, never a warning"
    );
}

#[test]
fn empty_qualifier_folds() {
    assert_eq!(groups_of("foo()"), vec![vec![term("foo()", Count::Num(1))]]);
}

#[test]
fn overflowing_count_folds() {
    assert_eq!(
        groups_of("cl(99999999999)"),
        vec![vec![term("cl(99999999999)", Count::Num(1))]]
    );
}

#[test]
fn non_token_code_part_folds() {
    // The code part before the paren must be a plain token; "foo bar" is not.
    assert_eq!(
        groups_of("foo bar (2)"),
        vec![vec![term("foo bar (2)", Count::Num(1))]]
    );
}

#[test]
fn unclosed_paren_is_a_bare_code() {
    let result = parse_str("foo(2");
    assert_eq!(
        result.parsed.groups[0].terms,
        vec![term("foo(2", Count::Num(1))]
    );
    assert!(
        result.diagnostics.is_empty(),
        "an unclosed paren is not a qualifier attempt; no diagnostic"
    );
}

#[test]
fn fold_diagnostic_span_covers_the_term() {
    let input = "cl, foo (bad)";
    let result = parse_str(input);
    let diag = result
        .diagnostics
        .iter()
        .find(|d| d.id == codes::PARSE_QUALIFIER_FOLDED)
        .expect("should emit fold diagnostic");
    let span = diag.span.expect("fold diagnostic should carry a span");
    assert_eq!(&input[span.start..span.end], "foo (bad)");
}

// ─── 4. Alternatives ────────────────────────────────────────────────────────

#[test]
fn pipe_splits_alternatives() {
    assert_eq!(
        groups_of("cl|cl(2)"),
        vec![vec![term("cl", Count::Num(1)), term("cl", Count::Num(2))]]
    );
}

#[test]
fn empty_alternatives_dropped() {
    assert_eq!(
        groups_of("cl| |ob"),
        vec![vec![term("cl", Count::Num(1)), term("ob", Count::Num(1))]]
    );
}

#[test]
fn pipes_only_segment_dropped() {
    let result = parse_str("| | |");
    assert!(result.parsed.is_empty());
}

// ─── 5. Ordering invariant ──────────────────────────────────────────────────

#[test]
fn single_term_groups_sort_first() {
    assert_eq!(
        groups_of("cl-bb (4)|cl-bb (2), cl-alt, cl-bs"),
        vec![
            vec![term("cl-alt", Count::Num(1))],
            vec![term("cl-bs", Count::Num(1))],
            vec![
                term("cl-bb", Count::Num(4)),
                term("cl-bb", Count::Num(2)),
            ],
        ],
        "single-term groups precede multi-term groups, input order otherwise preserved"
    );
}

#[test]
fn sort_is_stable_within_each_class() {
    assert_eq!(
        groups_of("a|b, c, d|e, f"),
        vec![
            vec![term("c", Count::Num(1))],
            vec![term("f", Count::Num(1))],
            vec![term("a", Count::Num(1)), term("b", Count::Num(1))],
            vec![term("d", Count::Num(1)), term("e", Count::Num(1))],
        ]
    );
}

// ─── 6. Serialization ───────────────────────────────────────────────────────

#[test]
fn parse_result_serializes() {
    let result = parse_str("cl(2)|ob, hrn");
    let json = serde_json::to_string(&result.parsed).unwrap();
    assert!(json.contains("\"code\":\"cl\""), "unexpected JSON: {json}");
    assert!(
        json.contains("\"kind\":\"num\""),
        "counts serialize tagged: {json}"
    );
}

#[test]
fn count_serde_roundtrip() {
    for count in [Count::Num(3), Count::Num(0), Count::Optional, Count::Ensemble] {
        let json = serde_json::to_string(&count).unwrap();
        let back: Count = serde_json::from_str(&json).unwrap();
        assert_eq!(back, count, "round-trip failed for {json}");
    }
}

//! Tests for the combined row-pipeline derivation.

mod common;

use common::{facets, table};
use instrumentation_core::{LabelTable, codes, derive_fields};

#[test]
fn empty_field_yields_three_empty_strings() {
    let result = derive_fields("", &table());
    assert_eq!(result.fields.dictionary, "");
    assert_eq!(result.fields.dictionary_full, "");
    assert_eq!(result.fields.dictionary_full_with_alt, "");
    assert!(
        result
            .diagnostics
            .iter()
            .any(|d| d.id == codes::PARSE_EMPTY_FIELD),
        "caller sees the empty-field note"
    );
}

#[test]
fn fields_are_comma_joined_collections() {
    let tbl = table();
    let input = "cl(3)|cl(2), hrn";
    let result = derive_fields(input, &tbl);
    let raw = facets(input, &tbl);

    assert_eq!(result.fields.dictionary, raw.ids.join(","));
    assert_eq!(
        result.fields.dictionary_full,
        raw.counted_keys
            .iter()
            .cloned()
            .collect::<Vec<_>>()
            .join(",")
    );
    assert_eq!(
        result.fields.dictionary_full_with_alt,
        raw.alt_displays.join(",")
    );
}

#[test]
fn full_example() {
    let result = derive_fields("cl(3)|cl(2), hrn", &table());
    assert_eq!(result.fields.dictionary, "horn,clarinet");
    assert_eq!(
        result.fields.dictionary_full,
        "clarinet002::2 clarinet,clarinet003::3 clarinet,horn001::1 horn"
    );
    assert_eq!(
        result.fields.dictionary_full_with_alt,
        "1 horn,3 clarinet OR 2 clarinet"
    );
    assert!(result.diagnostics.is_empty());
}

#[test]
fn diagnostics_concatenate_parser_first() {
    let result = derive_fields("foo (bad), zzz", &table());
    let ids: Vec<&str> = result.diagnostics.iter().map(|d| d.id.as_ref()).collect();
    let fold_pos = ids
        .iter()
        .position(|id| *id == codes::PARSE_QUALIFIER_FOLDED)
        .expect("fold note present");
    let unknown_pos = ids
        .iter()
        .position(|id| *id == codes::FACET_UNKNOWN_CODE)
        .expect("unknown-code warning present");
    assert!(
        fold_pos < unknown_pos,
        "parser diagnostics precede generator diagnostics: {ids:?}"
    );
}

#[test]
fn derivation_is_pure_across_threads() {
    // One immutable table shared by reference; no coordination needed.
    let tbl = LabelTable::from_pairs([("cl", "clarinet"), ("ob", "oboe")]);
    let inputs = ["cl(2)|ob, cl", "cl, cl(2)", "ob(opt)"];
    let sequential: Vec<_> = inputs
        .iter()
        .map(|i| derive_fields(i, &tbl).fields)
        .collect();

    std::thread::scope(|scope| {
        let tbl = &tbl;
        let handles: Vec<_> = inputs
            .iter()
            .copied()
            .map(|i| scope.spawn(move || derive_fields(i, tbl).fields))
            .collect();
        for (handle, expected) in handles.into_iter().zip(&sequential) {
            assert_eq!(&handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn result_serializes_for_tooling() {
    let result = derive_fields("cl(2), zzz", &table());
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"dictionary\""), "unexpected JSON: {json}");
    assert!(json.contains("INS2101"), "warning included: {json}");
}

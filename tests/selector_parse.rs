mod common;

use common::node;
use ipld_core::selector::{parse_selector, ParseError, SelectorParseConfig, SelectorParser};
use ipld_core::types::{PathSegment, ReprKind};
use serde_json::{json, Value};

fn parse(spec: Value) -> Result<Box<dyn ipld_core::selector::Selector>, ParseError> {
    parse_selector(&node(spec))
}

fn nested_explore_all(depth: usize) -> Value {
    let mut spec = json!({".": {}});
    for _ in 0..depth {
        spec = json!({"a": {">": spec}});
    }
    spec
}

#[test]
fn golden_explore_index_parses() {
    let s = parse(json!({"i": {"i": 2, ">": {".": {}}}})).unwrap();
    assert_eq!(s.interests(), Some(&[PathSegment::Index(2)][..]));

    let list = node(json!(["a", "b", "c"]));
    let next = s.explore(&list, &PathSegment::Index(2)).unwrap();
    assert!(next.decide(&list));
    assert!(!s.decide(&list));
}

#[test]
fn golden_every_directive_parses() {
    let specs = [
        json!({".": {}}),
        json!({"a": {">": {".": {}}}}),
        json!({"f": {"f>": {"name": {".": {}}, "age": {".": {}}}}}),
        json!({"i": {"i": 0, ">": {".": {}}}}),
        json!({"r": {"^": 1, "$": 3, ">": {".": {}}}}),
    ];
    for spec in specs {
        assert!(parse(spec.clone()).is_ok(), "spec: {spec}");
    }
}

#[test]
fn golden_explore_fields_interests_follow_spec_order() {
    let s = parse(json!({"f": {"f>": {"name": {".": {}}, "age": {".": {}}}}})).unwrap();
    assert_eq!(
        s.interests(),
        Some(&[PathSegment::from("name"), PathSegment::from("age")][..])
    );
}

#[test]
fn golden_explore_range_interests_are_half_open() {
    let s = parse(json!({"r": {"^": 1, "$": 3, ">": {".": {}}}})).unwrap();
    assert_eq!(
        s.interests(),
        Some(&[PathSegment::Index(1), PathSegment::Index(2)][..])
    );
}

#[test]
fn invariant_rejected_specs() {
    let cases: Vec<(&str, Value, ParseError)> = vec![
        (
            "index is not a number",
            json!({"i": {"i": "x", ">": {".": {}}}}),
            ParseError::InvalidField {
                directive: "ExploreIndex",
                field: "i",
                reason: "must be a number".into(),
            },
        ),
        (
            "index is negative",
            json!({"i": {"i": -1, ">": {".": {}}}}),
            ParseError::InvalidField {
                directive: "ExploreIndex",
                field: "i",
                reason: "must not be negative, found -1".into(),
            },
        ),
        (
            "index missing",
            json!({"i": {">": {".": {}}}}),
            ParseError::MissingField {
                directive: "ExploreIndex",
                field: "i",
            },
        ),
        (
            "next missing",
            json!({"i": {"i": 2}}),
            ParseError::MissingField {
                directive: "ExploreIndex",
                field: ">",
            },
        ),
        (
            "next is not a known directive",
            json!({"i": {"i": 2, ">": {"bogus": 1}}}),
            ParseError::UnknownDirective("bogus".into()),
        ),
        (
            "body is not a map",
            json!({"i": 2}),
            ParseError::BodyNotAMap {
                directive: "ExploreIndex",
                actual: ReprKind::Int,
            },
        ),
        (
            "outer is not a map",
            json!([{"i": {"i": 2, ">": {".": {}}}}]),
            ParseError::NotAMap(ReprKind::List),
        ),
        (
            "outer has two entries",
            json!({"i": {"i": 2, ">": {".": {}}}, ".": {}}),
            ParseError::NotSingleEntry,
        ),
        (
            "outer is empty",
            json!({}),
            ParseError::NotSingleEntry,
        ),
        (
            "range end before start",
            json!({"r": {"^": 3, "$": 1, ">": {".": {}}}}),
            ParseError::InvalidField {
                directive: "ExploreRange",
                field: "$",
                reason: "must not be less than start (3), found 1".into(),
            },
        ),
        (
            "fields is not a map",
            json!({"f": {"f>": [1]}}),
            ParseError::InvalidField {
                directive: "ExploreFields",
                field: "f>",
                reason: "must be a map, found list".into(),
            },
        ),
        (
            "matcher body is not a map",
            json!({".": null}),
            ParseError::BodyNotAMap {
                directive: "Matcher",
                actual: ReprKind::Null,
            },
        ),
    ];

    for (name, spec, expected) in cases {
        let err = parse(spec).expect_err(name);
        assert_eq!(err, expected, "case: {name}");
    }
}

#[test]
fn invariant_nesting_depth_is_bounded() {
    let limit = SelectorParseConfig::v0().max_depth;
    assert!(parse(nested_explore_all(limit)).is_ok());
    assert_eq!(
        parse(nested_explore_all(limit + 1)).unwrap_err(),
        ParseError::DepthExceeded(limit)
    );

    let shallow = SelectorParser::new(SelectorParseConfig {
        max_depth: 2,
        ..SelectorParseConfig::v0()
    });
    assert!(shallow.parse(&node(nested_explore_all(2))).is_ok());
    assert_eq!(
        shallow.parse(&node(nested_explore_all(3))).unwrap_err(),
        ParseError::DepthExceeded(2)
    );
}

#[test]
fn invariant_range_width_is_bounded() {
    let err = parse(json!({"r": {"^": 0, "$": i64::MAX, ">": {".": {}}}})).unwrap_err();
    assert!(matches!(
        err,
        ParseError::InvalidField {
            directive: "ExploreRange",
            field: "$",
            ..
        }
    ));

    let limit = SelectorParseConfig::v0().max_range_len as i64;
    let widest = parse(json!({"r": {"^": 5, "$": 5 + limit, ">": {".": {}}}})).unwrap();
    assert_eq!(widest.interests().map(<[_]>::len), Some(limit as usize));
    assert!(parse(json!({"r": {"^": 5, "$": 6 + limit, ">": {".": {}}}})).is_err());

    let narrow = SelectorParser::new(SelectorParseConfig {
        max_range_len: 2,
        ..SelectorParseConfig::v0()
    });
    let spec = node(json!({"r": {"^": 1, "$": 4, ">": {".": {}}}}));
    assert!(matches!(
        narrow.parse(&spec),
        Err(ParseError::InvalidField { field: "$", .. })
    ));
}

#[test]
fn golden_parse_error_messages() {
    let err = parse(json!({"i": {"i": 2}})).unwrap_err();
    assert_eq!(
        err.to_string(),
        "selector spec parse rejected: > field must be present in ExploreIndex selector"
    );

    let err = parse(json!(1)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "selector spec parse rejected: selector is a keyed union and thus must be a map, found int"
    );
}

#[test]
fn golden_parse_config_serialization() {
    let config = SelectorParseConfig::default();
    assert_eq!(config, SelectorParseConfig::v0());

    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(json, r#"{"max_depth":64,"max_range_len":65536}"#);

    let back: SelectorParseConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

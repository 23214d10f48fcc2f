mod common;

use common::node;
use ipld_core::gendemo::T2;
use ipld_core::node::Node;
use ipld_core::selector::{parse_selector, ExploreRange, Matcher, Selector};
use ipld_core::traversal::walk_matching;
use ipld_core::types::{NodeError, PathSegment};
use serde_json::{json, Value};

fn selector(spec: Value) -> Box<dyn Selector> {
    parse_selector(&node(spec)).unwrap()
}

fn render(path: &[PathSegment]) -> String {
    path.iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join("/")
}

fn matched_paths(root: &dyn Node, s: &dyn Selector) -> Vec<String> {
    let mut out = Vec::new();
    walk_matching(root, s, |path, _| {
        out.push(render(path));
        Ok(())
    })
    .unwrap();
    out
}

#[test]
fn golden_matcher_selects_the_root() {
    let root = node(json!({"a": 1}));
    let s = selector(json!({".": {}}));
    assert_eq!(matched_paths(&root, s.as_ref()), vec![""]);
}

#[test]
fn golden_explore_index_selects_one_element() {
    let root = node(json!(["zero", "one", "two"]));
    let s = selector(json!({"i": {"i": 1, ">": {".": {}}}}));

    let mut seen = Vec::new();
    walk_matching(&root, s.as_ref(), |path, n| {
        seen.push((render(path), n.as_string()?.to_string()));
        Ok(())
    })
    .unwrap();
    assert_eq!(seen, vec![("1".to_string(), "one".to_string())]);
}

#[test]
fn golden_explore_index_out_of_range_selects_nothing() {
    let root = node(json!(["zero"]));
    let s = selector(json!({"i": {"i": 5, ">": {".": {}}}}));
    assert!(matched_paths(&root, s.as_ref()).is_empty());
}

#[test]
fn golden_explore_index_on_a_map_selects_nothing() {
    let root = node(json!({"1": "one"}));
    let s = selector(json!({"i": {"i": 1, ">": {".": {}}}}));
    assert!(matched_paths(&root, s.as_ref()).is_empty());
}

#[test]
fn golden_explore_all_matches_every_child_in_order() {
    let root = node(json!({"x": [1, 2], "y": "s"}));
    let s = selector(json!({"a": {">": {".": {}}}}));
    assert_eq!(matched_paths(&root, s.as_ref()), vec!["x", "y"]);

    let deep = selector(json!({"a": {">": {"a": {">": {".": {}}}}}}));
    assert_eq!(matched_paths(&root, deep.as_ref()), vec!["x/0", "x/1"]);
}

#[test]
fn golden_explore_fields_follows_named_entries() {
    let root = node(json!({
        "name": "ada",
        "tags": ["math", "engines"],
        "skip": true,
    }));
    let s = selector(json!({"f": {"f>": {
        "tags": {"r": {"^": 1, "$": 5, ">": {".": {}}}},
        "name": {".": {}},
        "missing": {".": {}},
    }}}));
    assert_eq!(matched_paths(&root, s.as_ref()), vec!["tags/1", "name"]);
}

#[test]
fn golden_walk_over_generated_struct() {
    let root = T2::new(1, 2, 3, 4);
    let s = selector(json!({"f": {"f>": {"c": {".": {}}, "a": {".": {}}}}}));

    let mut values = Vec::new();
    walk_matching(&root, s.as_ref(), |_, n| {
        values.push(n.as_int()?);
        Ok(())
    })
    .unwrap();
    assert_eq!(values, vec![3, 1]);
}

#[test]
fn invariant_visit_errors_stop_the_walk() {
    let root = node(json!([1, "two", 3]));
    let s = selector(json!({"a": {">": {".": {}}}}));

    let mut visited = 0;
    let result = walk_matching(&root, s.as_ref(), |_, n| {
        visited += 1;
        n.as_int().map(|_| ())
    });
    assert!(matches!(result, Err(NodeError::WrongKind { .. })));
    assert_eq!(visited, 2);
}

#[test]
fn invariant_unbounded_range_walks_without_listing_indexes() {
    let s = ExploreRange::new(1, usize::MAX, Box::new(Matcher));
    assert!(s.interests().is_none());

    let root = node(json!(["zero", "one", "two"]));
    assert_eq!(matched_paths(&root, &s), vec!["1", "2"]);
}

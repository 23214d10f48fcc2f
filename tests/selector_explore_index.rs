mod common;

use common::node;
use ipld_core::node::Node;
use ipld_core::selector::{ExploreIndex, Matcher, Selector};
use ipld_core::types::PathSegment;
use serde_json::json;

fn explore_index(index: usize) -> ExploreIndex {
    ExploreIndex::new(index, Box::new(Matcher))
}

#[test]
fn invariant_interests_are_exactly_the_configured_index() {
    let s = explore_index(2);
    assert_eq!(s.interests(), Some(&[PathSegment::Index(2)][..]));
}

#[test]
fn invariant_explore_table() {
    let s = explore_index(2);
    let list_node = node(json!([0, 1, 2, 3]));
    let map_node = node(json!({"2": "two"}));
    let scalar_node = node(json!(2));
    let list: &dyn Node = &list_node;
    let map: &dyn Node = &map_node;
    let scalar: &dyn Node = &scalar_node;

    let cases: Vec<(&str, &dyn Node, PathSegment, bool)> = vec![
        ("list, matching index", list, PathSegment::Index(2), true),
        ("list, matching index as key", list, PathSegment::from("2"), true),
        ("list, other index", list, PathSegment::Index(1), false),
        ("list, other index as key", list, PathSegment::from("3"), false),
        ("list, non-numeric key", list, PathSegment::from("two"), false),
        ("list, negative-looking key", list, PathSegment::from("-2"), false),
        ("map, matching segment", map, PathSegment::from("2"), false),
        ("map, matching index", map, PathSegment::Index(2), false),
        ("scalar", scalar, PathSegment::Index(2), false),
    ];

    for (name, n, segment, should_explore) in cases {
        let next = s.explore(n, &segment);
        assert_eq!(next.is_some(), should_explore, "case: {name}");
        if let Some(next) = next {
            assert!(next.decide(n), "case: {name}: next selector is the matcher");
        }
    }
}

#[test]
fn invariant_explore_index_never_decides() {
    let s = explore_index(0);
    for n in [
        node(json!([1])),
        node(json!({"a": 1})),
        node(json!(null)),
        node(json!("s")),
    ] {
        assert!(!s.decide(&n));
    }
}

#[test]
fn invariant_explore_does_not_depend_on_bounds() {
    // Routing is decided on the segment alone; the list need not be long
    // enough to contain the index.
    let s = explore_index(10);
    let short = node(json!([1]));
    assert!(s.explore(&short, &PathSegment::Index(10)).is_some());
}

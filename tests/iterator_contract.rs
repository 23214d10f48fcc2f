mod common;

use common::node;
use ipld_core::gendemo::{K2, MapK2T2, T2};
use ipld_core::node::{Node, NodeAssembler};
use ipld_core::types::NodeError;
use serde_json::json;

fn map_keys(n: &dyn Node) -> Vec<String> {
    let mut it = n.map_iterator().expect("map node");
    let mut keys = Vec::new();
    while !it.done() {
        let (k, _) = it.next().unwrap();
        keys.push(k.as_string().unwrap().to_string());
    }
    keys
}

#[test]
fn invariant_map_iterator_yields_length_entries_then_overreads() {
    let n = node(json!({"z": 1, "y": 2, "x": 3}));
    let mut it = n.map_iterator().unwrap();
    for _ in 0..n.length().unwrap() {
        assert!(!it.done());
        it.next().unwrap();
    }
    assert!(it.done());
    assert!(matches!(it.next(), Err(NodeError::Overread)));
    assert!(matches!(it.next(), Err(NodeError::Overread)));
}

#[test]
fn invariant_list_iterator_yields_indexes_in_order() {
    let n = node(json!(["a", "b", "c"]));
    let mut it = n.list_iterator().unwrap();
    let mut seen = Vec::new();
    while !it.done() {
        let (index, value) = it.next().unwrap();
        seen.push((index, value.as_string().unwrap().to_string()));
    }
    assert_eq!(
        seen,
        vec![(0, "a".to_string()), (1, "b".to_string()), (2, "c".to_string())]
    );
    assert!(matches!(it.next(), Err(NodeError::Overread)));
}

#[test]
fn invariant_two_iterators_over_one_node_agree() {
    let n = node(json!({"one": 1, "two": 2, "three": 3}));
    assert_eq!(map_keys(&n), map_keys(&n));
    assert_eq!(map_keys(&n), vec!["one", "two", "three"]);

    let mut first = n.map_iterator().unwrap();
    let mut second = n.map_iterator().unwrap();
    // Interleaved iteration does not disturb either cursor.
    while !first.done() {
        let (k1, v1) = first.next().unwrap();
        let (k2, v2) = second.next().unwrap();
        assert_eq!(k1.as_string(), k2.as_string());
        assert_eq!(v1.as_int(), v2.as_int());
    }
    assert!(second.done());
}

#[test]
fn invariant_empty_composites_are_done_immediately() {
    let map = node(json!({}));
    let it = map.map_iterator().unwrap();
    assert!(it.done());

    let list = node(json!([]));
    let mut it = list.list_iterator().unwrap();
    assert!(it.done());
    assert!(matches!(it.next(), Err(NodeError::Overread)));
}

#[test]
fn invariant_iterators_absent_for_wrong_kind() {
    let list = node(json!([1]));
    assert!(list.map_iterator().is_none());
    let map = node(json!({"a": 1}));
    assert!(map.list_iterator().is_none());
    assert!(node(json!("s")).map_iterator().is_none());
    assert!(node(json!(null)).list_iterator().is_none());
}

#[test]
fn invariant_struct_iteration_follows_declared_field_order() {
    let t2 = T2::new(10, 20, 30, 40);
    assert_eq!(map_keys(&t2), vec!["a", "b", "c", "d"]);

    let mut it = t2.map_iterator().unwrap();
    let mut values = Vec::new();
    while !it.done() {
        values.push(it.next().unwrap().1.as_int().unwrap());
    }
    assert_eq!(values, vec![10, 20, 30, 40]);
    assert!(matches!(it.next(), Err(NodeError::Overread)));

    let k2 = K2::new("left", "right");
    assert_eq!(map_keys(&k2), vec!["u", "i"]);
    assert_eq!(k2.length(), Some(2));
}

#[test]
fn invariant_typed_map_iterates_in_insertion_order() {
    let mut na = MapK2T2::assembler();
    let ma = na.begin_map(3).unwrap();
    for (i, key) in ["b:2", "a:1", "c:3"].iter().enumerate() {
        let va = ma.assemble_entry(key).unwrap().begin_map(4).unwrap();
        for field in ["a", "b", "c", "d"] {
            va.assemble_entry(field).unwrap().assign_int(i as i64).unwrap();
        }
        va.finish().unwrap();
    }
    ma.finish().unwrap();
    let map = na.build_map().unwrap();

    let mut it = map.map_iterator().unwrap();
    let mut keys = Vec::new();
    while !it.done() {
        let (k, v) = it.next().unwrap();
        let k = k.as_any().downcast_ref::<K2>().unwrap();
        keys.push(k.to_string());
        assert_eq!(v.length(), Some(4));
    }
    assert_eq!(keys, vec!["b:2", "a:1", "c:3"]);
    assert!(matches!(it.next(), Err(NodeError::Overread)));
}

//! An in-memory traversal driver for selectors.
//!
//! Links are scalars here: the walk never loads what they point to.

use crate::node::Node;
use crate::selector::Selector;
use crate::types::{NodeError, PathSegment, ReprKind};

/// Walks `node` under `selector`, calling `visit` with the path and node of
/// every node the selector decides on, in traversal order.
pub fn walk_matching<F>(
    node: &dyn Node,
    selector: &dyn Selector,
    mut visit: F,
) -> Result<(), NodeError>
where
    F: FnMut(&[PathSegment], &dyn Node) -> Result<(), NodeError>,
{
    let mut path = Vec::new();
    walk(node, selector, &mut path, &mut visit)
}

fn walk<F>(
    node: &dyn Node,
    selector: &dyn Selector,
    path: &mut Vec<PathSegment>,
    visit: &mut F,
) -> Result<(), NodeError>
where
    F: FnMut(&[PathSegment], &dyn Node) -> Result<(), NodeError>,
{
    if selector.decide(node) {
        tracing::trace!(depth = path.len(), "selector matched");
        visit(path, node)?;
    }
    if !node.repr_kind().is_recursive() {
        return Ok(());
    }

    match selector.interests() {
        Some(interests) => {
            for segment in interests {
                let child = match node.lookup_segment(segment) {
                    Ok(child) => child,
                    Err(e) if e.is_absent() => continue,
                    Err(e) => return Err(e),
                };
                descend(node, child, segment.clone(), selector, path, visit)?;
            }
        }
        None => match node.repr_kind() {
            ReprKind::Map => {
                if let Some(mut entries) = node.map_iterator() {
                    while !entries.done() {
                        let (key, child) = entries.next()?;
                        let segment = PathSegment::Key(key.as_string()?.to_string());
                        descend(node, child, segment, selector, path, visit)?;
                    }
                }
            }
            _ => {
                if let Some(mut elements) = node.list_iterator() {
                    while !elements.done() {
                        let (index, child) = elements.next()?;
                        descend(node, child, PathSegment::Index(index), selector, path, visit)?;
                    }
                }
            }
        },
    }
    Ok(())
}

fn descend<F>(
    parent: &dyn Node,
    child: &dyn Node,
    segment: PathSegment,
    selector: &dyn Selector,
    path: &mut Vec<PathSegment>,
    visit: &mut F,
) -> Result<(), NodeError>
where
    F: FnMut(&[PathSegment], &dyn Node) -> Result<(), NodeError>,
{
    let Some(next) = selector.explore(parent, &segment) else {
        return Ok(());
    };
    path.push(segment);
    let result = walk(child, next, path, visit);
    path.pop();
    result
}

use crate::types::{NodeError, ReprKind};

use super::{Node, NodeAssembler};

/// Structural copy of `src` into `dst`, through the public contracts only.
///
/// This is the slow path behind `assign_node` when the source node has a
/// different concrete type than the assembler produces.
pub fn copy_node(src: &dyn Node, dst: &mut dyn NodeAssembler) -> Result<(), NodeError> {
    match src.repr_kind() {
        ReprKind::Null => dst.assign_null(),
        ReprKind::Bool => dst.assign_bool(src.as_bool()?),
        ReprKind::Int => dst.assign_int(src.as_int()?),
        ReprKind::Float => dst.assign_float(src.as_float()?),
        ReprKind::String => dst.assign_string(src.as_string()?),
        ReprKind::Bytes => dst.assign_bytes(src.as_bytes()?),
        ReprKind::Link => dst.assign_link(src.as_link()?),
        ReprKind::Map => {
            let ma = dst.begin_map(src.length().unwrap_or(0))?;
            if let Some(mut entries) = src.map_iterator() {
                while !entries.done() {
                    let (key, value) = entries.next()?;
                    copy_node(key, ma.assemble_key()?)?;
                    copy_node(value, ma.assemble_value()?)?;
                }
            }
            ma.finish()
        }
        ReprKind::List => {
            let la = dst.begin_list(src.length().unwrap_or(0))?;
            if let Some(mut elements) = src.list_iterator() {
                while !elements.done() {
                    let (_, value) = elements.next()?;
                    copy_node(value, la.assemble_value()?)?;
                }
            }
            la.finish()
        }
    }
}

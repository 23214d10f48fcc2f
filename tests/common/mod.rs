#![allow(dead_code)]

use ipld_core::node::{BasicAssembler, BasicNode, NodeAssembler};
use ipld_core::types::NodeError;
use serde_json::Value;

/// Drives `na` through the assembler contract the way a decoder would.
pub fn assemble_json<A>(value: &Value, na: &mut A) -> Result<(), NodeError>
where
    A: NodeAssembler + ?Sized,
{
    match value {
        Value::Null => na.assign_null(),
        Value::Bool(b) => na.assign_bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => na.assign_int(i),
            None => na.assign_float(n.as_f64().expect("finite number")),
        },
        Value::String(s) => na.assign_string(s),
        Value::Array(items) => {
            let la = na.begin_list(items.len())?;
            for item in items {
                assemble_json(item, la.assemble_value()?)?;
            }
            la.finish()
        }
        Value::Object(entries) => {
            let ma = na.begin_map(entries.len())?;
            for (key, item) in entries {
                assemble_json(item, ma.assemble_entry(key)?)?;
            }
            ma.finish()
        }
    }
}

pub fn node(value: Value) -> BasicNode {
    let mut builder = BasicAssembler::new();
    assemble_json(&value, &mut builder).expect("fixture must assemble");
    builder.build_basic().expect("fixture must build")
}

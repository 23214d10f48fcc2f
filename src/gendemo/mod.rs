//! What generated code for a schema looks like.
//!
//! These types are written the way a code generator would emit them for a
//! map with complex keys and struct values. Lookups dispatch through fixed
//! matches on field names; assemblers enforce each struct's closed field
//! set at construction time. They trade genericity for speed and validation
//! and are not general-purpose maps.

pub mod k2;
pub mod map_k2_t2;
pub mod structs;
pub mod t2;

use std::marker::PhantomData;

pub use k2::K2;
pub use map_k2_t2::{MapK2T2, MapK2T2Assembler, MapK2T2Style};
pub use structs::{FieldValue, GeneratedStruct, StructAssembler};
pub use t2::T2;

use crate::node::{NodeBuilder, NodeStyle};

/// Style of a generated struct: builds it through its [`StructAssembler`].
pub struct StructStyle<T>(PhantomData<fn() -> T>);

impl<T> StructStyle<T> {
    pub const fn new() -> Self {
        StructStyle(PhantomData)
    }
}

impl<T: GeneratedStruct> NodeStyle for StructStyle<T> {
    fn new_builder(&self) -> Box<dyn NodeBuilder> {
        Box::new(StructAssembler::<T>::new())
    }
}

mod classify;
mod document;
mod field;
mod flatten;
mod kind;
mod materialize;
pub mod meta;
mod openapi;

pub use self::{
    classify::classify,
    document::{build, DocumentSchema, Options},
    field::{FieldNode, FieldSchema, Format},
    flatten::flatten,
    kind::{InstanceType, TypeKind},
    materialize::materialize,
    meta::MetaProps,
};

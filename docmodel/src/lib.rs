pub mod config;
pub mod environment;
mod generator;

pub use docmodel_core::{
    error_ext, location, CompiledPath, Descriptor, DocumentModel, Error, ErrorExt, Marker, Model,
    Schema, SchemaOptions, Tree, Wrapper,
};
pub use docmodel_schema::{
    build, classify, flatten, materialize, meta, DocumentSchema, FieldNode, FieldSchema, Format,
    InstanceType, MetaProps, Options, TypeKind,
};
pub use generator::{GenerateError, Generator};
pub use openapiv3 as openapi;

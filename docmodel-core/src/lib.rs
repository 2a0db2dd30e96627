mod de;
mod descriptor;
mod error;
pub mod error_ext;
pub mod location;
mod marker;
mod schema;
mod tree;

pub use self::{
    descriptor::{CompiledPath, Descriptor, Wrapper},
    error::Error,
    error_ext::{ErrorExt, NextError},
    location::Location,
    marker::Marker,
    schema::{DocumentModel, Model, Schema, SchemaOptions, ID_KEY, VERSION_KEY},
    tree::Tree,
};

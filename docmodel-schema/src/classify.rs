use docmodel_core::{CompiledPath, Descriptor, Marker, Tree};

use crate::TypeKind;

/// Determines the kind of a field descriptor.
///
/// Returns `None` when the descriptor does not declare a stored field: an
/// absent declaration, a virtual, or a compiled path of unknown type. Any
/// shape that is not recognized is treated as a free-form `object`.
pub fn classify(descriptor: &Descriptor) -> Option<TypeKind> {
    match descriptor {
        Descriptor::Absent => None,
        Descriptor::Marker(marker) => Some(classify_marker(marker)),
        Descriptor::Name(name) => Some(classify_name(name)),
        Descriptor::Wrapper(wrapper) => match wrapper.ty() {
            Descriptor::Absent => Some(TypeKind::Object),
            ty => classify(ty),
        },
        Descriptor::Path(path) => classify_path(path),
        Descriptor::Array(_) => Some(TypeKind::Array),
        Descriptor::Embedded(tree) => match embedded_type(tree) {
            Some(ty) => classify(ty),
            None => Some(TypeKind::Object),
        },
        Descriptor::Nested(_) | Descriptor::Schema(_) => Some(TypeKind::Object),
    }
}

/// The type an embedded tree declares through its own `type` key.
///
/// Only a marker or a type name counts. Anything else under `type` is an
/// ordinary field that happens to be called `type`.
pub(crate) fn embedded_type(tree: &Tree) -> Option<&Descriptor> {
    tree.get("type")
        .filter(|ty| matches!(ty, Descriptor::Marker(_) | Descriptor::Name(_)))
}

fn classify_marker(marker: &Marker) -> TypeKind {
    match marker {
        Marker::Number => TypeKind::Number,
        Marker::String => TypeKind::String,
        Marker::Mixed => TypeKind::Object,
        Marker::ObjectId => TypeKind::String,
        Marker::Boolean => TypeKind::Boolean,
        Marker::Map => TypeKind::Map,
        Marker::Date => TypeKind::String,
        Marker::Named(name) => match Marker::from_name(name) {
            Marker::Named(name) => TypeKind::from_lowercase(name.to_lowercase()),
            canonical => classify_marker(&canonical),
        },
    }
}

fn classify_name(name: &str) -> TypeKind {
    if name.eq_ignore_ascii_case("number") {
        TypeKind::Number
    } else if name.eq_ignore_ascii_case("string") {
        TypeKind::String
    } else if name == "ObjectId" || name == "ObjectID" {
        TypeKind::String
    } else if name.eq_ignore_ascii_case("boolean") {
        TypeKind::Boolean
    } else {
        TypeKind::Object
    }
}

fn classify_path(path: &CompiledPath) -> Option<TypeKind> {
    // a compiled path that is not typed by its instance tag is computed, not stored
    path.instance().and_then(classify_instance)
}

fn classify_instance(instance: &str) -> Option<TypeKind> {
    let kind = match instance {
        "Array" | "DocumentArray" | "SchemaArray" => TypeKind::Array,
        "ObjectId" | "ObjectID" | "Date" | "SchemaDate" => TypeKind::String,
        "Mixed" => TypeKind::Object,
        "String" | "SchemaString" | "Buffer" | "SchemaBuffer" | "SchemaObjectId" => {
            TypeKind::String
        }
        "Boolean" | "SchemaBoolean" => TypeKind::Boolean,
        "Number" | "SchemaNumber" => TypeKind::Number,
        _ => return None,
    };

    Some(kind)
}

use std::fmt;

use serde::{Serialize, Serializer};

/// The kind a descriptor classifies as.
///
/// `Map` only exists during classification; the materialized schema of a map
/// is an object with `additionalProperties`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    String,
    Number,
    Boolean,
    Object,
    Array,
    Map,
    /// Lower-cased name of a custom scalar type, passed through as is.
    Other(Box<str>),
}

impl TypeKind {
    /// Maps a lower-cased type name onto a known kind when it spells one.
    pub fn from_lowercase(name: String) -> Self {
        match name.as_str() {
            "string" => TypeKind::String,
            "number" => TypeKind::Number,
            "boolean" => TypeKind::Boolean,
            "object" => TypeKind::Object,
            "array" => TypeKind::Array,
            "map" => TypeKind::Map,
            _ => TypeKind::Other(name.into_boxed_str()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TypeKind::String => "string",
            TypeKind::Number => "number",
            TypeKind::Boolean => "boolean",
            TypeKind::Object => "object",
            TypeKind::Array => "array",
            TypeKind::Map => "map",
            TypeKind::Other(name) => name,
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `type` of a materialized schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InstanceType {
    String,
    Number,
    Boolean,
    Object,
    Array,
    Other(Box<str>),
}

impl InstanceType {
    pub fn as_str(&self) -> &str {
        match self {
            InstanceType::String => "string",
            InstanceType::Number => "number",
            InstanceType::Boolean => "boolean",
            InstanceType::Object => "object",
            InstanceType::Array => "array",
            InstanceType::Other(name) => name,
        }
    }
}

impl From<TypeKind> for InstanceType {
    fn from(kind: TypeKind) -> Self {
        match kind {
            TypeKind::String => InstanceType::String,
            TypeKind::Number => InstanceType::Number,
            TypeKind::Boolean => InstanceType::Boolean,
            TypeKind::Object | TypeKind::Map => InstanceType::Object,
            TypeKind::Array => InstanceType::Array,
            TypeKind::Other(name) => InstanceType::Other(name),
        }
    }
}

impl fmt::Display for InstanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for InstanceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

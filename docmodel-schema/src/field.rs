use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::InstanceType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Format {
    #[serde(rename = "date-time")]
    DateTime,
}

/// The normalized schema of one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSchema {
    #[serde(rename = "type")]
    pub ty: InstanceType,

    /// Copied declaration options (`enum`, `description`, caller extras), in option-name order.
    #[serde(flatten)]
    pub meta: IndexMap<String, Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,

    /// Names of the required properties, or of the required item properties on `items`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, FieldSchema>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<FieldSchema>>,

    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<Box<FieldSchema>>,
}

impl FieldSchema {
    pub fn new(ty: InstanceType) -> Self {
        Self {
            ty,
            meta: IndexMap::new(),
            format: None,
            required: Vec::new(),
            properties: None,
            items: None,
            additional_properties: None,
        }
    }

    /// An object with no known properties.
    pub fn free_form() -> Self {
        Self {
            properties: Some(IndexMap::new()),
            ..Self::new(InstanceType::Object)
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.meta.get(crate::meta::DESCRIPTION).and_then(Value::as_str)
    }

    pub fn enumeration(&self) -> Option<&[Value]> {
        self.meta
            .get(crate::meta::ENUM)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }

    pub fn property(&self, name: &str) -> Option<&FieldSchema> {
        self.properties.as_ref().and_then(|p| p.get(name))
    }
}

/// A materialized field still carrying the bookkeeping its parent needs.
///
/// The parent reads the field name and required flag when it places the
/// schema into its own `properties`, and keeps only the schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldNode {
    pub(crate) field: Option<Box<str>>,
    pub(crate) required: bool,
    pub(crate) schema: FieldSchema,
}

impl FieldNode {
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    pub fn into_schema(self) -> FieldSchema {
        self.schema
    }
}

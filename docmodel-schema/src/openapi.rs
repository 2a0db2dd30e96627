use indexmap::IndexMap;
use openapiv3::{
    AdditionalProperties, AnySchema, ArrayType, BooleanType, NumberType, ObjectType, ReferenceOr,
    Schema, SchemaData, SchemaKind, StringFormat, StringType, Type, VariantOrUnknownOrEmpty,
};
use serde_json::Value;

use crate::{
    meta::{DESCRIPTION, ENUM},
    DocumentSchema, FieldSchema, Format, InstanceType,
};

impl From<FieldSchema> for Schema {
    fn from(field: FieldSchema) -> Self {
        let FieldSchema {
            ty,
            mut meta,
            format,
            required,
            properties,
            items,
            additional_properties,
        } = field;

        let description = match meta.shift_remove(DESCRIPTION) {
            Some(Value::String(description)) => Some(description),
            Some(other) => {
                meta.insert(DESCRIPTION.to_string(), other);
                None
            }
            None => None,
        };

        let schema_kind = match ty {
            InstanceType::String => {
                let format = match format {
                    Some(Format::DateTime) => VariantOrUnknownOrEmpty::Item(StringFormat::DateTime),
                    None => VariantOrUnknownOrEmpty::Empty,
                };

                SchemaKind::Type(Type::String(StringType {
                    format,
                    enumeration: enumeration(meta.shift_remove(ENUM), |v| {
                        v.as_str().map(String::from)
                    }),
                    ..Default::default()
                }))
            }
            InstanceType::Number => SchemaKind::Type(Type::Number(NumberType {
                enumeration: enumeration(meta.shift_remove(ENUM), Value::as_f64),
                ..Default::default()
            })),
            InstanceType::Boolean => SchemaKind::Type(Type::Boolean(BooleanType::default())),
            InstanceType::Object => {
                let ty = ObjectType {
                    properties: properties
                        .unwrap_or_default()
                        .into_iter()
                        .map(|(name, schema)| (name, ReferenceOr::Item(Box::new(schema.into()))))
                        .collect(),
                    required,
                    additional_properties: additional_properties.map(|values| {
                        AdditionalProperties::Schema(Box::new(ReferenceOr::Item((*values).into())))
                    }),
                    ..Default::default()
                };

                SchemaKind::Type(Type::Object(ty))
            }
            InstanceType::Array => {
                let ty = ArrayType {
                    items: items.map(|items| ReferenceOr::Item(Box::new((*items).into()))),
                    min_items: None,
                    max_items: None,
                    unique_items: false,
                };

                SchemaKind::Type(Type::Array(ty))
            }
            InstanceType::Other(name) => SchemaKind::Any(AnySchema {
                typ: Some(name.into()),
                ..Default::default()
            }),
        };

        Schema {
            schema_data: SchemaData {
                description,
                extensions: extensions(meta),
                ..Default::default()
            },
            schema_kind,
        }
    }
}

impl From<DocumentSchema> for Schema {
    fn from(document: DocumentSchema) -> Self {
        let DocumentSchema {
            title,
            required,
            properties,
        } = document;

        let ty = ObjectType {
            properties: properties
                .into_iter()
                .map(|(name, schema)| (name, ReferenceOr::Item(Box::new(schema.into()))))
                .collect(),
            required,
            ..Default::default()
        };

        Schema {
            schema_data: SchemaData {
                title,
                ..Default::default()
            },
            schema_kind: SchemaKind::Type(Type::Object(ty)),
        }
    }
}

impl DocumentSchema {
    /// Registers the document under its title and returns a reference to it.
    ///
    /// An untitled document cannot be referenced and is returned inline.
    pub fn reference(
        self,
        schemas: &mut IndexMap<String, ReferenceOr<Schema>>,
    ) -> ReferenceOr<Schema> {
        let Some(name) = self.title.clone() else {
            return ReferenceOr::Item(self.into());
        };

        let reference = ReferenceOr::Reference {
            reference: format!("#/components/schemas/{}", name),
        };

        if !schemas.contains_key(&name) {
            schemas.insert(name, ReferenceOr::Item(self.into()));
        }

        reference
    }
}

fn enumeration<T>(values: Option<Value>, f: impl Fn(&Value) -> Option<T>) -> Vec<Option<T>> {
    let Some(Value::Array(values)) = values else {
        return Vec::new();
    };

    values
        .iter()
        .filter_map(|v| if v.is_null() { Some(None) } else { f(v).map(Some) })
        .collect()
}

/// Metadata without an OpenAPI counterpart, as `x-` extensions.
fn extensions(meta: IndexMap<String, Value>) -> IndexMap<String, Value> {
    meta.into_iter()
        .map(|(name, value)| (format!("x-{name}"), value))
        .collect()
}

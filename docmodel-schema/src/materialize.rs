use docmodel_core::{Descriptor, Marker, Tree};
use indexmap::IndexMap;
use serde_json::Value;

use crate::{
    classify,
    classify::embedded_type,
    flatten::{flatten, Properties},
    meta::REQUIRED,
    FieldNode, FieldSchema, Format, MetaProps, TypeKind,
};

/// Builds the normalized schema of one field descriptor.
///
/// Returns `None` when the descriptor [classifies](classify) as no type. The
/// returned node carries `key` and the declaration's `required` flag for the
/// parent to consume; nested objects already hold the promoted `required`
/// lists of their own properties.
pub fn materialize(
    key: Option<&str>,
    descriptor: &Descriptor,
    meta_props: &MetaProps,
) -> Option<FieldNode> {
    let kind = classify(descriptor)?;

    let mut required = false;
    let mut meta = IndexMap::new();

    if let Some(options) = descriptor.options() {
        for prop in meta_props.iter() {
            match options.get(prop) {
                None | Some(Value::Null) => {}
                Some(value) if prop == REQUIRED => required = is_truthy(value),
                Some(value) => {
                    meta.insert(prop.to_string(), value.clone());
                }
            }
        }
    }

    let mut schema = FieldSchema {
        meta,
        ..FieldSchema::new(kind.clone().into())
    };

    if is_date(descriptor) {
        schema.format = Some(Format::DateTime);
    }

    match kind {
        TypeKind::Array => {
            let items = materialize_element(array_element(descriptor), meta_props);
            schema.items = Some(Box::new(items));
        }
        TypeKind::Object => {
            let Properties {
                properties,
                required: promoted,
            } = nested_tree(descriptor)
                .map(|tree| flatten(tree, meta_props))
                .unwrap_or_default()
                .into_iter()
                .collect();

            schema.properties = Some(properties);
            schema.required = promoted;
        }
        TypeKind::Map => {
            let values = materialize_element(map_element(descriptor), meta_props);
            schema.additional_properties = Some(Box::new(values));
        }
        TypeKind::String | TypeKind::Number | TypeKind::Boolean | TypeKind::Other(_) => {}
    }

    Some(FieldNode {
        field: key.map(Into::into),
        required,
        schema,
    })
}

/// Materializes an array item or map value. The element's own `required` flag is dropped.
fn materialize_element(element: Option<&Descriptor>, meta_props: &MetaProps) -> FieldSchema {
    element
        .and_then(|element| materialize(None, element, meta_props))
        .map(FieldNode::into_schema)
        .unwrap_or_else(FieldSchema::free_form)
}

fn array_element(descriptor: &Descriptor) -> Option<&Descriptor> {
    match descriptor {
        Descriptor::Array(elements) => elements.first(),
        Descriptor::Wrapper(wrapper) => array_element(wrapper.ty()),
        Descriptor::Path(path) => path.caster(),
        _ => None,
    }
}

fn map_element(descriptor: &Descriptor) -> Option<&Descriptor> {
    match descriptor {
        Descriptor::Wrapper(wrapper) => wrapper.of_type(),
        _ => None,
    }
}

/// The field tree behind an object descriptor. Mixed and untyped objects have none.
fn nested_tree(descriptor: &Descriptor) -> Option<&Tree> {
    match descriptor {
        Descriptor::Schema(schema) => Some(schema.tree()),
        Descriptor::Nested(tree) => Some(tree),
        Descriptor::Embedded(tree) if embedded_type(tree).is_none() => Some(tree),
        Descriptor::Wrapper(wrapper) => nested_tree(wrapper.ty()),
        _ => None,
    }
}

fn is_date(descriptor: &Descriptor) -> bool {
    let declared = match descriptor {
        Descriptor::Wrapper(wrapper) => wrapper.ty(),
        Descriptor::Embedded(tree) => embedded_type(tree).unwrap_or(descriptor),
        _ => descriptor,
    };

    match declared {
        Descriptor::Marker(Marker::Date) => true,
        Descriptor::Marker(Marker::Named(name)) => Marker::from_name(name) == Marker::Date,
        _ => false,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use docmodel_core::{CompiledPath, Schema, Wrapper};
    use serde_json::json;

    use super::*;
    use crate::InstanceType;

    fn field(descriptor: impl Into<Descriptor>) -> FieldSchema {
        materialize(Some("field"), &descriptor.into(), &MetaProps::default())
            .unwrap()
            .into_schema()
    }

    fn to_json(schema: &FieldSchema) -> Value {
        serde_json::to_value(schema).unwrap()
    }

    #[test]
    fn test_leaf() {
        let node = materialize(Some("name"), &Marker::String.into(), &MetaProps::default()).unwrap();

        assert_eq!(node.field(), Some("name"));
        assert!(!node.is_required());
        assert_eq!(to_json(node.schema()), json!({ "type": "string" }));
    }

    #[test]
    fn test_array_of_string() {
        let schema = field(Descriptor::array_of(Marker::String));

        assert_eq!(schema.ty, InstanceType::Array);
        assert_eq!(schema.items.as_ref().unwrap().ty, InstanceType::String);
    }

    #[test]
    fn test_wrapped_array() {
        let schema = field(Wrapper::new(Descriptor::array_of(Marker::Number)).required(true));
        assert_eq!(
            to_json(&schema),
            json!({ "type": "array", "items": { "type": "number" } })
        );
    }

    #[test]
    fn test_empty_array() {
        let schema = field(Descriptor::Array(Vec::new()));
        assert_eq!(
            to_json(&schema),
            json!({ "type": "array", "items": { "type": "object", "properties": {} } })
        );
    }

    #[test]
    fn test_array_items_drop_required() {
        let schema = field(Descriptor::array_of(
            Wrapper::new(Marker::String).required(true),
        ));

        assert_eq!(
            to_json(&schema),
            json!({ "type": "array", "items": { "type": "string" } })
        );
    }

    #[test]
    fn test_array_of_virtual_falls_back_to_object() {
        let schema = field(Descriptor::array_of(CompiledPath::virtual_path("v")));
        assert_eq!(*schema.items.unwrap(), FieldSchema::free_form());
    }

    #[test]
    fn test_compiled_array_caster() {
        let schema = field(CompiledPath::new("tags", "SchemaArray").with_caster(Marker::String));
        assert_eq!(schema.items.unwrap().ty, InstanceType::String);
    }

    #[test]
    fn test_date() {
        assert_eq!(
            to_json(&field(Marker::Date)),
            json!({ "type": "string", "format": "date-time" })
        );
        assert_eq!(
            to_json(&field(Wrapper::new(Marker::Date).option("default", "now"))),
            json!({ "type": "string", "format": "date-time" })
        );
    }

    #[test]
    fn test_named_canonical_markers() {
        assert_eq!(
            to_json(&field(Marker::Named("Date".into()))),
            json!({ "type": "string", "format": "date-time" })
        );
        assert_eq!(
            to_json(&field(Wrapper::new(Marker::Named("Date".into())))),
            json!({ "type": "string", "format": "date-time" })
        );
        assert_eq!(
            to_json(&field(Marker::Named("Mixed".into()))),
            json!({ "type": "object", "properties": {} })
        );
        assert_eq!(
            to_json(&field(Marker::Named("Map".into()))),
            to_json(&field(Marker::Map))
        );
    }

    #[test]
    fn test_embedded_type() {
        assert_eq!(
            to_json(&field(Descriptor::Embedded(Tree::new().with("type", Marker::Date)))),
            json!({ "type": "string", "format": "date-time" })
        );
        assert_eq!(
            to_json(&field(Descriptor::Embedded(Tree::new().with("type", Marker::Mixed)))),
            json!({ "type": "object", "properties": {} })
        );
        assert_eq!(
            to_json(&field(Descriptor::Embedded(Tree::new().with("name", Marker::String)))),
            json!({ "type": "object", "properties": { "name": { "type": "string" } } })
        );
    }

    #[test]
    fn test_free_form_objects() {
        let expected = json!({ "type": "object", "properties": {} });

        assert_eq!(to_json(&field(Descriptor::empty())), expected);
        assert_eq!(to_json(&field(Wrapper::new(Descriptor::empty()))), expected);
        assert_eq!(to_json(&field(Marker::Mixed)), expected);
        assert_eq!(to_json(&field(Wrapper::new(Marker::Mixed))), expected);
        assert_eq!(to_json(&field(Marker::Named("Object".into()))), expected);
    }

    #[test]
    fn test_map() {
        let schema = field(Wrapper::new(Marker::Map).of(Marker::Boolean));
        assert_eq!(
            to_json(&schema),
            json!({ "type": "object", "additionalProperties": { "type": "boolean" } })
        );

        let schema = field(Marker::Map);
        assert_eq!(
            to_json(&schema),
            json!({
                "type": "object",
                "additionalProperties": { "type": "object", "properties": {} }
            })
        );
    }

    #[test]
    fn test_nested_required_promotion() {
        let schema = field(
            Tree::new()
                .with("cost", Wrapper::new(Marker::Number).required(true))
                .with("label", Marker::String),
        );

        assert_eq!(schema.required, ["cost"]);
        assert_eq!(
            to_json(&schema),
            json!({
                "type": "object",
                "required": ["cost"],
                "properties": {
                    "cost": { "type": "number" },
                    "label": { "type": "string" }
                }
            })
        );
    }

    #[test]
    fn test_array_of_schema_promotes_item_required() {
        let paw = Schema::new(
            Tree::new().with("numToes", Wrapper::new(Marker::Number).required(true)),
        );
        let schema = field(Wrapper::new(Descriptor::array_of(paw)).required(true));

        let items = schema.items.unwrap();
        assert_eq!(items.required, ["numToes"]);
        assert_eq!(
            items.properties.unwrap().keys().collect::<Vec<_>>(),
            ["numToes", "_id"]
        );
    }

    #[test]
    fn test_sub_schema_keeps_id() {
        let schema = field(Wrapper::new(Schema::new(Tree::new())));
        assert_eq!(
            to_json(&schema),
            json!({ "type": "object", "properties": { "_id": { "type": "string" } } })
        );
    }

    #[test]
    fn test_meta_props() {
        let descriptor = Wrapper::new(Marker::String)
            .option("enum", json!(["bar", "baz"]))
            .description("something cool")
            .option("bar", "baz")
            .option("ref", "User")
            .option("default", Value::Null);

        let node = materialize(
            Some("foo"),
            &descriptor.clone().into(),
            &MetaProps::with_extra(["bar", "default"]),
        )
        .unwrap();

        assert_eq!(
            to_json(node.schema()),
            json!({
                "type": "string",
                "enum": ["bar", "baz"],
                "description": "something cool",
                "bar": "baz"
            })
        );

        let node = materialize(Some("foo"), &descriptor.into(), &MetaProps::none()).unwrap();
        assert_eq!(to_json(node.schema()), json!({ "type": "string" }));
    }

    #[test]
    fn test_required_flag() {
        let props = MetaProps::default();

        let node = materialize(
            Some("a"),
            &Wrapper::new(Marker::Boolean).required(true).into(),
            &props,
        )
        .unwrap();
        assert!(node.is_required());

        let node = materialize(
            Some("a"),
            &Wrapper::new(Marker::Boolean)
                .option("required", json!([true, "a is required"]))
                .into(),
            &props,
        )
        .unwrap();
        assert!(node.is_required());

        let node = materialize(
            Some("a"),
            &Wrapper::new(Marker::Boolean).required(false).into(),
            &props,
        )
        .unwrap();
        assert!(!node.is_required());

        let node = materialize(
            Some("a"),
            &Wrapper::new(Marker::Boolean).required(true).into(),
            &MetaProps::none(),
        )
        .unwrap();
        assert!(!node.is_required());
    }

    #[test]
    fn test_custom_type_passthrough() {
        assert_eq!(
            to_json(&field(Marker::Named("Decimal128".into()))),
            json!({ "type": "decimal128" })
        );
    }

    #[test]
    fn test_skipped() {
        let props = MetaProps::default();

        assert!(materialize(Some("a"), &Descriptor::Absent, &props).is_none());
        assert!(materialize(Some("a"), &CompiledPath::virtual_path("a").into(), &props).is_none());
    }
}

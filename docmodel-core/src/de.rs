//! JSON form of schema declarations.
//!
//! Type names starting with an upper-case letter are constructors
//! (`"String"`, `"Decimal128"`), other strings are type names compared
//! ignoring case. Objects are read as wrappers when they carry a `type`
//! key, and as nested shapes otherwise. `$`-prefixed keys select the
//! host-schema forms: `$schema`, `$virtual`, `$instance`/`$path`,
//! `$schemaType`.

use indexmap::IndexMap;
use serde::{de, Deserialize, Deserializer};
use serde_json::{Map, Value};
use snafu::{OptionExt, ResultExt};

use crate::{
    error::{InvalidDirectiveSnafu, JsonSnafu, NotATreeSnafu, UnsupportedDescriptorSnafu},
    CompiledPath, Descriptor, Error, Marker, Model, Schema, SchemaOptions, Tree, Wrapper,
};

const SCHEMA: &str = "$schema";
const OPTIONS: &str = "$options";
const VIRTUAL: &str = "$virtual";
const INSTANCE: &str = "$instance";
const PATH: &str = "$path";
const CASTER: &str = "$caster";
const SCHEMA_TYPE: &str = "$schemaType";
const TYPE: &str = "type";
const OF: &str = "of";

const ROOT: &str = "$";

impl Descriptor {
    pub fn from_json_value(value: Value) -> Result<Self, Error> {
        decode_descriptor(value, ROOT)
    }
}

impl Schema {
    pub fn from_json_value(value: Value) -> Result<Self, Error> {
        decode_schema(value, ROOT)
    }

    pub fn from_json_str(s: &str) -> Result<Self, Error> {
        let value = serde_json::from_str(s).context(JsonSnafu)?;
        Self::from_json_value(value)
    }
}

impl Model {
    pub fn from_json_value(value: Value) -> Result<Self, Error> {
        let mut object = match value {
            Value::Object(object) => object,
            other => {
                return NotATreeSnafu {
                    path: ROOT,
                    found: kind_of(&other),
                }
                .fail()
            }
        };

        let name = match object.remove("modelName") {
            Some(Value::String(name)) => name,
            _ => {
                return InvalidDirectiveSnafu {
                    path: ROOT,
                    directive: "modelName",
                    expected: "a string",
                }
                .fail()
            }
        };

        let schema = object.remove("schema").unwrap_or(Value::Object(Map::new()));
        let schema = decode_schema(schema, &child_path(ROOT, "schema"))?;

        Ok(Model::new(name, schema))
    }

    pub fn from_json_str(s: &str) -> Result<Self, Error> {
        let value = serde_json::from_str(s).context(JsonSnafu)?;
        Self::from_json_value(value)
    }
}

macro_rules! deserialize_impl {
    ($ty:ty, $decode:expr) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let value = Value::deserialize(deserializer)?;
                $decode(value).map_err(de::Error::custom)
            }
        }
    };
}

deserialize_impl!(Descriptor, Descriptor::from_json_value);
deserialize_impl!(Schema, Schema::from_json_value);
deserialize_impl!(Model, Model::from_json_value);
deserialize_impl!(Tree, |value| decode_tree(value, ROOT));

fn decode_descriptor(value: Value, path: &str) -> Result<Descriptor, Error> {
    match value {
        Value::Null => Ok(Descriptor::Absent),
        Value::String(s) => Ok(decode_type_name(s)),
        Value::Array(elements) => elements
            .into_iter()
            .enumerate()
            .map(|(idx, element)| decode_descriptor(element, &format!("{path}[{idx}]")))
            .collect::<Result<Vec<_>, _>>()
            .map(Descriptor::Array),
        Value::Object(object) => decode_object(object, path),
        other => UnsupportedDescriptorSnafu {
            path,
            found: kind_of(&other),
        }
        .fail(),
    }
}

fn decode_type_name(s: String) -> Descriptor {
    if s.starts_with(|c: char| c.is_ascii_uppercase()) {
        Descriptor::Marker(Marker::from_name(&s))
    } else {
        Descriptor::Name(s.into_boxed_str())
    }
}

fn decode_object(mut object: Map<String, Value>, path: &str) -> Result<Descriptor, Error> {
    if object.contains_key(SCHEMA) {
        return decode_schema(Value::Object(object), path).map(Descriptor::Schema);
    }

    if let Some(name) = object.remove(VIRTUAL) {
        let name = expect_string(name, path, VIRTUAL)?;
        return Ok(CompiledPath::virtual_path(name).into());
    }

    if object.contains_key(INSTANCE) || object.contains_key(PATH) {
        let instance = object
            .remove(INSTANCE)
            .map(|instance| expect_string(instance, path, INSTANCE))
            .transpose()?;
        let compiled = object
            .remove(PATH)
            .map(|p| expect_string(p, path, PATH))
            .transpose()?
            .unwrap_or_default();
        let caster = object
            .remove(CASTER)
            .map(|caster| decode_descriptor(caster, &child_path(path, CASTER)))
            .transpose()?;

        return Ok(CompiledPath::from_parts(compiled, instance, caster).into());
    }

    if let Some(tree) = object.remove(SCHEMA_TYPE) {
        return decode_tree(tree, &child_path(path, SCHEMA_TYPE)).map(Descriptor::Embedded);
    }

    if let Some(ty) = object.remove(TYPE) {
        let ty = decode_descriptor(ty, &child_path(path, TYPE))?;
        let of = object
            .remove(OF)
            .map(|of| decode_descriptor(of, &child_path(path, OF)))
            .transpose()?;
        let options = object.into_iter().collect::<IndexMap<_, _>>();

        return Ok(Wrapper::from_parts(ty, of, options).into());
    }

    decode_fields(object, path).map(Descriptor::Nested)
}

fn decode_schema(value: Value, path: &str) -> Result<Schema, Error> {
    let mut object = match value {
        Value::Object(object) => object,
        other => {
            return NotATreeSnafu {
                path,
                found: kind_of(&other),
            }
            .fail()
        }
    };

    let Some(tree) = object.remove(SCHEMA) else {
        return decode_fields(object, path).map(Schema::new);
    };

    let options = match object.remove(OPTIONS) {
        Some(options) => decode_options(options, &child_path(path, OPTIONS))?,
        None => SchemaOptions::default(),
    };
    let tree = decode_tree(tree, &child_path(path, SCHEMA))?;

    Ok(Schema::with_options(tree, options))
}

fn decode_options(value: Value, path: &str) -> Result<SchemaOptions, Error> {
    let object = match value {
        Value::Object(object) => object,
        other => {
            return NotATreeSnafu {
                path,
                found: kind_of(&other),
            }
            .fail()
        }
    };

    let mut options = SchemaOptions::default();

    if let Some(id) = object.get("_id") {
        options.id = id.as_bool().context(InvalidDirectiveSnafu {
            path,
            directive: "_id",
            expected: "a boolean",
        })?;
    }

    Ok(options)
}

fn decode_tree(value: Value, path: &str) -> Result<Tree, Error> {
    match value {
        Value::Object(object) => decode_fields(object, path),
        other => NotATreeSnafu {
            path,
            found: kind_of(&other),
        }
        .fail(),
    }
}

fn decode_fields(object: Map<String, Value>, path: &str) -> Result<Tree, Error> {
    let mut tree = Tree::new();

    for (name, value) in object {
        let descriptor = decode_descriptor(value, &child_path(path, &name))?;
        tree.insert(name, descriptor);
    }

    Ok(tree)
}

fn expect_string(value: Value, path: &str, directive: &'static str) -> Result<Box<str>, Error> {
    match value {
        Value::String(s) => Ok(s.into_boxed_str()),
        _ => InvalidDirectiveSnafu {
            path,
            directive,
            expected: "a string",
        }
        .fail(),
    }
}

fn child_path(path: &str, key: &str) -> String {
    format!("{path}.{key}")
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

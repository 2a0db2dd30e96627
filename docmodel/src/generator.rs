use config::ConfigError;
use docmodel_core::{DocumentModel, ErrorExt, Location, Model, NextError};
use docmodel_schema::{build, DocumentSchema, Options};
use indexmap::IndexMap;
use openapiv3::{ReferenceOr, Schema};
use serde_json::Value;
use snafu::{ResultExt, Snafu};

use crate::config::{document::DocumentConfig, Config};

#[derive(Debug, Snafu)]
pub enum GenerateError {
    #[snafu(display("failed to decode the model"))]
    Decode {
        #[snafu(implicit)]
        location: Location,
        source: docmodel_core::Error,
    },

    #[snafu(display("failed to encode the document"))]
    Encode {
        #[snafu(implicit)]
        location: Location,
        source: serde_json::Error,
    },
}

impl ErrorExt for GenerateError {
    fn entry(&self) -> (Location, NextError<'_>) {
        match self {
            GenerateError::Decode { location, source } => (*location, NextError::Ext(source)),
            GenerateError::Encode { location, source } => (*location, NextError::Std(source)),
        }
    }
}

/// Builds documents with one fixed set of [`Options`].
#[derive(Debug, Clone, Default)]
pub struct Generator {
    options: Options,
}

impl Generator {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Reads the options from [`Config::load`].
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_config(&Config::load()?)
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let cfg: DocumentConfig = config.get()?;
        Ok(Self::new(cfg.into()))
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn generate<M>(&self, model: &M) -> DocumentSchema
    where
        M: DocumentModel + ?Sized,
    {
        build(model, &self.options)
    }

    /// Builds the document of `model` and registers it in `schemas`.
    pub fn register<M>(
        &self,
        model: &M,
        schemas: &mut IndexMap<String, ReferenceOr<Schema>>,
    ) -> ReferenceOr<Schema>
    where
        M: DocumentModel + ?Sized,
    {
        self.generate(model).reference(schemas)
    }

    /// Decodes a JSON model (`{ "modelName": .., "schema": .. }`) and returns its document.
    pub fn generate_json(&self, json: &str) -> Result<Value, GenerateError> {
        let result = Model::from_json_str(json)
            .context(DecodeSnafu)
            .and_then(|model| serde_json::to_value(self.generate(&model)).context(EncodeSnafu));

        if let Err(e) = &result {
            tracing::error!("{}", e.error_stack().join("\n"));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs};

    use serde_json::json;

    use super::*;
    use crate::environment::Environment;

    const CAT: &str = r#"{
        "modelName": "Cat",
        "schema": {
            "name": { "type": "String", "required": true },
            "owner": { "type": "ObjectId", "ref": "User" },
            "born": "Date"
        }
    }"#;

    #[test]
    fn test_generate_json() {
        let doc = Generator::default().generate_json(CAT).unwrap();

        assert_eq!(
            doc,
            json!({
                "title": "Cat",
                "required": ["name"],
                "properties": {
                    "name": { "type": "string" },
                    "owner": { "type": "string" },
                    "born": { "type": "string", "format": "date-time" }
                }
            })
        );
    }

    #[test]
    fn test_generate_json_with_options() {
        let generator = Generator::new(Options {
            props: vec!["ref".into()],
            omit_id: false,
        });
        let doc = generator.generate_json(CAT).unwrap();

        assert_eq!(doc["properties"]["owner"]["ref"], json!("User"));
        assert_eq!(doc["properties"]["_id"], json!({ "type": "string" }));
        assert!(doc["properties"].get("__v").is_none());
    }

    #[test]
    fn test_generate_json_errors() {
        let generator = Generator::default();

        let err = generator.generate_json("{").unwrap_err();
        assert!(matches!(err, GenerateError::Decode { .. }));
        assert_eq!(err.error_stack().len(), 3);

        let err = generator
            .generate_json(r#"{ "modelName": "Cat", "schema": { "age": 3 } }"#)
            .unwrap_err();
        let stack = err.error_stack();
        assert_eq!(stack.len(), 2);
        assert!(stack[1].contains("$.schema.age"));
    }

    #[test]
    fn test_from_config() {
        let path = env::temp_dir().join(format!("docmodel-{}-generator", std::process::id()));
        fs::create_dir_all(&path).unwrap();
        fs::write(
            path.join("docmodel.toml"),
            "[document]\nprops = [\"ref\", \"default\"]\n",
        )
        .unwrap();

        let config = Config::from_folder(&Environment::Test, &path).unwrap();
        let generator = Generator::from_config(&config).unwrap();

        assert_eq!(generator.options().props, ["ref", "default"]);
        assert!(generator.options().omit_id);
    }

    #[test]
    fn test_register() {
        let model = Model::from_json_str(CAT).unwrap();
        let mut schemas = IndexMap::new();

        let reference = Generator::default().register(&model, &mut schemas);
        assert!(matches!(reference, ReferenceOr::Reference { .. }));
        assert!(schemas.contains_key("Cat"));
    }
}

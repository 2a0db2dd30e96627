use docmodel_schema::Options;
use serde::{Deserialize, Serialize};

use super::ConfigPrefix;

/// Options applied to every generated document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Extra declaration options copied onto fields, such as `ref` or `default`.
    pub props: Vec<String>,
    pub omit_id: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        let Options { props, omit_id } = Options::default();
        Self { props, omit_id }
    }
}

impl ConfigPrefix for DocumentConfig {
    const PREFIX: &'static str = "document";
}

impl From<DocumentConfig> for Options {
    fn from(cfg: DocumentConfig) -> Self {
        let DocumentConfig { props, omit_id } = cfg;
        Options { props, omit_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_options() {
        let options = Options::from(DocumentConfig {
            props: vec!["ref".into()],
            omit_id: false,
        });

        assert!(options.meta_props().contains("ref"));
        assert_eq!(options.omitted(), ["__v"]);
    }

    #[test]
    fn test_same_keys_as_options() {
        let value = serde_json::json!({ "props": ["ref"], "omit_id": false });

        let cfg: DocumentConfig = serde_json::from_value(value.clone()).unwrap();
        let options: Options = serde_json::from_value(value).unwrap();

        assert!(!options.omit_id);
        assert_eq!(Options::from(cfg), options);
    }

    #[test]
    fn test_default_matches_options() {
        assert_eq!(Options::from(DocumentConfig::default()), Options::default());
    }
}

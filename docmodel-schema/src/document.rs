use docmodel_core::{DocumentModel, ID_KEY, VERSION_KEY};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{flatten, flatten::Properties, FieldSchema, MetaProps};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Extra declaration options to copy, after `enum`, `required` and `description`.
    pub props: Vec<String>,
    /// Leave `_id` out of the root properties. `__v` is always left out.
    pub omit_id: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            props: Vec::new(),
            omit_id: true,
        }
    }
}

impl Options {
    pub fn meta_props(&self) -> MetaProps {
        MetaProps::with_extra(&self.props)
    }

    /// Root fields left out of the document for these options.
    pub fn omitted(&self) -> &'static [&'static str] {
        if self.omit_id {
            &[VERSION_KEY, ID_KEY]
        } else {
            &[VERSION_KEY]
        }
    }
}

/// The schema of a whole document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentSchema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    pub properties: IndexMap<String, FieldSchema>,
}

impl DocumentSchema {
    pub fn property(&self, name: &str) -> Option<&FieldSchema> {
        self.properties.get(name)
    }
}

/// Builds the document schema of a model.
pub fn build<M>(model: &M, options: &Options) -> DocumentSchema
where
    M: DocumentModel + ?Sized,
{
    let meta_props = options.meta_props();
    let omitted = options.omitted();

    let Properties {
        properties,
        required,
    } = flatten(model.schema().tree(), &meta_props)
        .into_iter()
        .filter(|node| node.field().is_some_and(|name| !omitted.contains(&name)))
        .collect();

    let title = model.model_name().map(String::from);

    tracing::debug!(
        title = title.as_deref().unwrap_or_default(),
        fields = properties.len(),
        "built document schema"
    );

    DocumentSchema {
        title,
        required,
        properties,
    }
}

use docmodel_core::Tree;
use indexmap::IndexMap;

use crate::{materialize, FieldNode, FieldSchema, MetaProps};

/// Materializes every declared field of `tree`, in declaration order.
///
/// Paths that are not stored fields (virtuals, untyped compiled paths) are
/// left out. Each node still carries its name and `required` flag.
pub fn flatten(tree: &Tree, meta_props: &MetaProps) -> Vec<FieldNode> {
    tree.iter()
        .filter_map(|(name, descriptor)| {
            let node = materialize(Some(name), descriptor, meta_props);

            if node.is_none() {
                tracing::trace!(field = name, "skipping path without a stored type");
            }

            node
        })
        .collect()
}

/// Object properties assembled from field nodes, with the names of the
/// required ones promoted into `required`.
#[derive(Debug, Default)]
pub(crate) struct Properties {
    pub(crate) properties: IndexMap<String, FieldSchema>,
    pub(crate) required: Vec<String>,
}

impl FromIterator<FieldNode> for Properties {
    fn from_iter<I: IntoIterator<Item = FieldNode>>(iter: I) -> Self {
        let mut assembled = Properties::default();

        for FieldNode {
            field,
            required,
            schema,
        } in iter
        {
            let Some(name) = field else {
                continue;
            };

            let name = String::from(name);

            if required {
                assembled.required.push(name.clone());
            }

            assembled.properties.insert(name, schema);
        }

        assembled
    }
}

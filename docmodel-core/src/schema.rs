use crate::{CompiledPath, Descriptor, Marker, Tree, Wrapper};

pub const ID_KEY: &str = "_id";
pub const VERSION_KEY: &str = "__v";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaOptions {
    /// Declare an `_id` object-id path automatically.
    pub id: bool,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self { id: true }
    }
}

/// A full schema object, as opposed to a plain nested shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    tree: Tree,
    options: SchemaOptions,
}

impl Schema {
    pub fn new(tree: Tree) -> Self {
        Self::with_options(tree, SchemaOptions::default())
    }

    pub fn with_options(mut tree: Tree, options: SchemaOptions) -> Self {
        if options.id && !tree.contains(ID_KEY) {
            tree.insert(ID_KEY, Wrapper::new(Marker::ObjectId).option("auto", true));
        }

        Self { tree, options }
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn options(&self) -> SchemaOptions {
        self.options
    }

    pub fn add<K, D>(&mut self, name: K, descriptor: D) -> &mut Self
    where
        K: Into<String>,
        D: Into<Descriptor>,
    {
        self.tree.insert(name, descriptor);
        self
    }

    /// Declares a computed field. It has a path but no stored type.
    pub fn virtual_path(&mut self, name: &str) -> &mut Self {
        self.tree.insert(name, CompiledPath::virtual_path(name));
        self
    }
}

impl AsRef<Tree> for Schema {
    fn as_ref(&self) -> &Tree {
        &self.tree
    }
}

/// A named schema, with its version key declared.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    name: Box<str>,
    schema: Schema,
}

impl Model {
    pub fn new<N: Into<Box<str>>>(name: N, mut schema: Schema) -> Self {
        if !schema.tree.contains(VERSION_KEY) {
            schema.tree.insert(VERSION_KEY, Marker::Number);
        }

        Self {
            name: name.into(),
            schema,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

/// Anything that exposes a schema to document.
pub trait DocumentModel {
    fn model_name(&self) -> Option<&str> {
        None
    }

    fn schema(&self) -> &Schema;
}

impl DocumentModel for Model {
    fn model_name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn schema(&self) -> &Schema {
        &self.schema
    }
}

impl DocumentModel for Schema {
    fn schema(&self) -> &Schema {
        self
    }
}

macro_rules! wrapper_impl {
    ($($desc:tt)+) => {
        impl $($desc)+
        where
            T: DocumentModel
        {
            fn model_name(&self) -> Option<&str> {
                T::model_name(self)
            }

            fn schema(&self) -> &Schema {
                T::schema(self)
            }
        }
    };
}

wrapper_impl!(<T: ?Sized> DocumentModel for &T);
wrapper_impl!(<T: ?Sized> DocumentModel for Box<T>);
wrapper_impl!(<T: ?Sized> DocumentModel for std::rc::Rc<T>);
wrapper_impl!(<T: ?Sized> DocumentModel for std::sync::Arc<T>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_id() {
        let schema = Schema::new(Tree::new().with("name", Marker::String));
        assert_eq!(schema.tree().keys().collect::<Vec<_>>(), ["name", "_id"]);

        let schema = Schema::with_options(
            Tree::new().with("name", Marker::String),
            SchemaOptions { id: false },
        );
        assert!(!schema.tree().contains(ID_KEY));
    }

    #[test]
    fn test_declared_id_is_kept() {
        let schema = Schema::new(
            Tree::new()
                .with("_id", Marker::String)
                .with("name", Marker::String),
        );

        assert_eq!(schema.tree().get("_id"), Some(&Marker::String.into()));
        assert_eq!(schema.tree().len(), 2);
    }

    #[test]
    fn test_model_version_key() {
        let model = Model::new("Cat", Schema::new(Tree::new()));

        assert_eq!(model.model_name(), Some("Cat"));
        assert_eq!(
            model.schema().tree().get(VERSION_KEY),
            Some(&Marker::Number.into())
        );
    }

    #[test]
    fn test_virtual_path() {
        let mut schema = Schema::new(Tree::new());
        schema.virtual_path("fullName");

        assert_eq!(
            schema.tree().get("fullName"),
            Some(&CompiledPath::virtual_path("fullName").into())
        );
    }

    #[test]
    fn test_wrapped_model() {
        let model = std::sync::Arc::new(Model::new("Cat", Schema::new(Tree::new())));
        assert_eq!(DocumentModel::model_name(&model), Some("Cat"));
        assert_eq!((&*model).model_name(), Some("Cat"));
    }
}

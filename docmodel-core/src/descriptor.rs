use indexmap::IndexMap;
use serde_json::Value;

use crate::{Marker, Schema, Tree};

/// One field declaration, in any of the shapes a schema accepts.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Descriptor {
    /// No declaration at all.
    #[default]
    Absent,
    /// `name: String`
    Marker(Marker),
    /// `name: "string"`, compared ignoring case.
    Name(Box<str>),
    /// `name: { type: String, required: true, ... }`
    Wrapper(Wrapper),
    /// `tags: [String]`; holds zero or one element descriptor.
    Array(Vec<Descriptor>),
    /// `meta: { votes: Number }`; an empty tree is a free-form object.
    Nested(Tree),
    /// A full sub-schema, with its own options.
    Schema(Schema),
    /// A schema-type wrapper around a single nested tree.
    Embedded(Tree),
    /// A compiled path, either typed by its `instance` tag or virtual.
    Path(CompiledPath),
}

impl Descriptor {
    /// The free-form object descriptor, `{}`.
    pub fn empty() -> Self {
        Descriptor::Nested(Tree::new())
    }

    pub fn name<S: Into<Box<str>>>(name: S) -> Self {
        Descriptor::Name(name.into())
    }

    pub fn array_of<D: Into<Descriptor>>(element: D) -> Self {
        Descriptor::Array(vec![element.into()])
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Descriptor::Absent)
    }

    /// Declaration options (`enum`, `required`, ...) carried by the descriptor itself.
    pub fn options(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Descriptor::Wrapper(wrapper) => Some(&wrapper.options),
            _ => None,
        }
    }

    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options().and_then(|options| options.get(name))
    }
}

impl From<Marker> for Descriptor {
    fn from(marker: Marker) -> Self {
        Descriptor::Marker(marker)
    }
}

impl From<Wrapper> for Descriptor {
    fn from(wrapper: Wrapper) -> Self {
        Descriptor::Wrapper(wrapper)
    }
}

impl From<Tree> for Descriptor {
    fn from(tree: Tree) -> Self {
        Descriptor::Nested(tree)
    }
}

impl From<Schema> for Descriptor {
    fn from(schema: Schema) -> Self {
        Descriptor::Schema(schema)
    }
}

impl From<CompiledPath> for Descriptor {
    fn from(path: CompiledPath) -> Self {
        Descriptor::Path(path)
    }
}

impl From<Vec<Descriptor>> for Descriptor {
    fn from(elements: Vec<Descriptor>) -> Self {
        Descriptor::Array(elements)
    }
}

/// `{ type: ..., of: ..., <options> }`
#[derive(Debug, Clone, PartialEq)]
pub struct Wrapper {
    ty: Box<Descriptor>,
    of: Option<Box<Descriptor>>,
    options: IndexMap<String, Value>,
}

impl Wrapper {
    pub fn new<D: Into<Descriptor>>(ty: D) -> Self {
        Self {
            ty: Box::new(ty.into()),
            of: None,
            options: IndexMap::new(),
        }
    }

    pub fn ty(&self) -> &Descriptor {
        &self.ty
    }

    /// Value type of a map declaration.
    pub fn of_type(&self) -> Option<&Descriptor> {
        self.of.as_deref()
    }

    pub fn options(&self) -> &IndexMap<String, Value> {
        &self.options
    }

    pub fn of<D: Into<Descriptor>>(mut self, of: D) -> Self {
        self.of = Some(Box::new(of.into()));
        self
    }

    pub fn required(self, required: bool) -> Self {
        self.option("required", required)
    }

    pub fn description<S: Into<String>>(self, description: S) -> Self {
        self.option("description", description.into())
    }

    pub fn option<K, V>(mut self, name: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.options.insert(name.into(), value.into());
        self
    }

    pub(crate) fn from_parts(
        ty: Descriptor,
        of: Option<Descriptor>,
        options: IndexMap<String, Value>,
    ) -> Self {
        Self {
            ty: Box::new(ty),
            of: of.map(Box::new),
            options,
        }
    }
}

/// A path compiled by the host schema: its `instance` tag names the type.
///
/// A path without an instance tag is a virtual (computed) field.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPath {
    path: Box<str>,
    instance: Option<Box<str>>,
    caster: Option<Box<Descriptor>>,
}

impl CompiledPath {
    pub fn new<P, I>(path: P, instance: I) -> Self
    where
        P: Into<Box<str>>,
        I: Into<Box<str>>,
    {
        Self {
            path: path.into(),
            instance: Some(instance.into()),
            caster: None,
        }
    }

    pub fn virtual_path<P: Into<Box<str>>>(path: P) -> Self {
        Self {
            path: path.into(),
            instance: None,
            caster: None,
        }
    }

    /// Element type of an array path.
    pub fn with_caster<D: Into<Descriptor>>(mut self, caster: D) -> Self {
        self.caster = Some(Box::new(caster.into()));
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn instance(&self) -> Option<&str> {
        self.instance.as_deref()
    }

    pub fn caster(&self) -> Option<&Descriptor> {
        self.caster.as_deref()
    }

    pub(crate) fn from_parts(
        path: Box<str>,
        instance: Option<Box<str>>,
        caster: Option<Descriptor>,
    ) -> Self {
        Self {
            path,
            instance,
            caster: caster.map(Box::new),
        }
    }
}

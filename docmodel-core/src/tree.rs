use indexmap::IndexMap;

use crate::Descriptor;

/// Declared fields of a schema, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tree {
    fields: IndexMap<String, Descriptor>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field, replacing any previous declaration under the same name in place.
    pub fn insert<K, D>(&mut self, name: K, descriptor: D) -> Option<Descriptor>
    where
        K: Into<String>,
        D: Into<Descriptor>,
    {
        self.fields.insert(name.into(), descriptor.into())
    }

    pub fn with<K, D>(mut self, name: K, descriptor: D) -> Self
    where
        K: Into<String>,
        D: Into<Descriptor>,
    {
        self.insert(name, descriptor);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Descriptor> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Descriptor)> {
        self.fields.iter().map(|(name, d)| (name.as_str(), d))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, D> FromIterator<(K, D)> for Tree
where
    K: Into<String>,
    D: Into<Descriptor>,
{
    fn from_iter<I: IntoIterator<Item = (K, D)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, d)| (name.into(), d.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = (&'a String, &'a Descriptor);
    type IntoIter = indexmap::map::Iter<'a, String, Descriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

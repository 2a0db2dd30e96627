pub const ENUM: &str = "enum";
pub const REQUIRED: &str = "required";
pub const DESCRIPTION: &str = "description";

/// Names of the declaration options copied onto each materialized field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaProps(Vec<Box<str>>);

impl MetaProps {
    /// The defaults followed by `extra`, without duplicates.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut props = Self::default();
        props.extend(extra);
        props
    }

    /// No options at all, not even `required`.
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|prop| &**prop)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.iter().any(|prop| prop == name)
    }
}

impl Default for MetaProps {
    fn default() -> Self {
        Self(vec![ENUM.into(), REQUIRED.into(), DESCRIPTION.into()])
    }
}

impl<S: AsRef<str>> Extend<S> for MetaProps {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for prop in iter {
            let prop = prop.as_ref();

            if !self.contains(prop) {
                self.0.push(prop.into());
            }
        }
    }
}

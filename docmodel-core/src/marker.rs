use std::fmt;

/// A canonical type symbol, the way a schema declares `name: String`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Marker {
    String,
    Number,
    Boolean,
    Date,
    ObjectId,
    Map,
    /// The dynamic type: any value, no known properties.
    Mixed,
    /// Any other constructible type, identified by its name (`Buffer`, `Decimal128`, ...).
    Named(Box<str>),
}

impl Marker {
    /// Resolves a constructor name to its canonical marker.
    pub fn from_name(name: &str) -> Self {
        match name {
            "String" => Marker::String,
            "Number" => Marker::Number,
            "Boolean" => Marker::Boolean,
            "Date" => Marker::Date,
            "ObjectId" | "ObjectID" => Marker::ObjectId,
            "Map" => Marker::Map,
            "Mixed" => Marker::Mixed,
            _ => Marker::Named(name.into()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Marker::String => "String",
            Marker::Number => "Number",
            Marker::Boolean => "Boolean",
            Marker::Date => "Date",
            Marker::ObjectId => "ObjectId",
            Marker::Map => "Map",
            Marker::Mixed => "Mixed",
            Marker::Named(name) => name,
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

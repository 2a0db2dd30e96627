use snafu::Snafu;

use crate::{
    error_ext::{ErrorExt, NextError},
    location::Location,
};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("unsupported descriptor at `{path}`: expected a type, found {found}"))]
    UnsupportedDescriptor {
        #[snafu(implicit)]
        location: Location,
        path: Box<str>,
        found: &'static str,
    },

    #[snafu(display("expected a field tree at `{path}`, found {found}"))]
    NotATree {
        #[snafu(implicit)]
        location: Location,
        path: Box<str>,
        found: &'static str,
    },

    #[snafu(display("`{directive}` at `{path}` must be {expected}"))]
    InvalidDirective {
        #[snafu(implicit)]
        location: Location,
        path: Box<str>,
        directive: &'static str,
        expected: &'static str,
    },

    #[snafu(display("{source}"))]
    Json {
        #[snafu(implicit)]
        location: Location,
        source: serde_json::Error,
    },
}

impl ErrorExt for Error {
    fn entry(&self) -> (Location, NextError<'_>) {
        match self {
            Error::Json { location, source } => (*location, NextError::Std(source)),

            Error::UnsupportedDescriptor { location, .. }
            | Error::NotATree { location, .. }
            | Error::InvalidDirective { location, .. } => (*location, NextError::None),
        }
    }
}

use std::{fmt, panic};

use snafu::GenerateImplicitData;

/// Source position where an error was constructed.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Location(&'static panic::Location<'static>);

impl Location {
    #[track_caller]
    #[inline]
    pub const fn caller() -> Self {
        Self(panic::Location::caller())
    }

    #[inline]
    pub const fn file(&self) -> &'static str {
        self.0.file()
    }

    #[inline]
    pub const fn line(&self) -> u32 {
        self.0.line()
    }
}

impl fmt::Display for Location {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl GenerateImplicitData for Location {
    #[track_caller]
    #[inline]
    fn generate() -> Self {
        Self::caller()
    }
}

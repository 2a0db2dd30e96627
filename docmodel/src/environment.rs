use std::{env, fmt};

/// The deployment environment, which picks the `docmodel-<env>.toml` layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Prod,
    Dev,
    Test,
    Custom(Box<str>),
}

impl Environment {
    pub const VAR: &'static str = "DOCMODEL_ENV";

    /// The environment named by `DOCMODEL_ENV`.
    ///
    /// Unset or blank falls back to `dev` in debug builds and `prod` in release builds.
    pub fn current() -> Self {
        env::var(Self::VAR)
            .ok()
            .filter(|name| !name.trim().is_empty())
            .map(|name| Self::parse(&name))
            .unwrap_or_else(Self::profile_default)
    }

    /// Reads an environment name. Well-known names and their long forms are
    /// matched ignoring case; anything else is kept as given, trimmed.
    pub fn parse(name: &str) -> Self {
        let name = name.trim();

        match name.to_ascii_lowercase().as_str() {
            "prod" | "production" => Environment::Prod,
            "dev" | "development" => Environment::Dev,
            "test" | "testing" => Environment::Test,
            _ => Environment::Custom(name.into()),
        }
    }

    fn profile_default() -> Self {
        if cfg!(debug_assertions) {
            Environment::Dev
        } else {
            Environment::Prod
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Environment::Prod => "prod",
            Environment::Dev => "dev",
            Environment::Test => "test",
            Environment::Custom(name) => name,
        }
    }

    /// Name of the configuration file layered on top of `docmodel.toml`.
    pub fn config_file(&self) -> String {
        format!("docmodel-{}.toml", self.as_str())
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub mod document;
pub mod logger;

use std::{
    env,
    ops::Deref,
    path::{Path, PathBuf},
};

use config::{ConfigError, File, ValueKind};
use serde::Deserialize;

use crate::environment::Environment;

const ENV_PREFIX: &str = "DOCMODEL";

#[derive(Clone)]
pub struct Config {
    inner: config::Config,
    env: Environment,
}

impl Config {
    pub fn new(config: config::Config, env: Environment) -> Self {
        Self { inner: config, env }
    }

    /// Loads the [current](Environment::current) environment's configuration
    /// from the `config` folder next to the crate manifest, or next to the binary.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_folder(&Environment::current(), &default_folder())
    }

    /// Layers `docmodel.toml`, `docmodel-<env>.toml` and `DOCMODEL_*` variables.
    ///
    /// Both files are optional. Nested keys in variables are separated by
    /// `__`, as in `DOCMODEL_DOCUMENT__OMIT_ID=false`.
    pub fn from_folder(env: &Environment, path: &Path) -> Result<Self, ConfigError> {
        let base_cfg = path.join("docmodel.toml");
        let env_cfg = path.join(env.config_file());

        for cfg in [&base_cfg, &env_cfg] {
            tracing::info!("trying to load configuration from `{}`", cfg.display());
            if !cfg.exists() {
                tracing::info!("`{}` does not exist", cfg.display());
            }
        }

        let vars = config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("document.props");

        let config = config::Config::builder()
            .add_source(File::from(base_cfg).required(false))
            .add_source(File::from(env_cfg).required(false))
            .add_source(vars)
            .build()?;

        Ok(Self {
            inner: config,
            env: env.clone(),
        })
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Reads the section under `T::PREFIX`. A missing section reads as an empty table.
    pub fn get<'de, T>(&self) -> Result<T, ConfigError>
    where
        T: ConfigPrefix + Deserialize<'de>,
    {
        match self.inner.get::<T>(T::PREFIX) {
            Ok(o) => Ok(o),
            Err(e) => {
                let ConfigError::NotFound(_) = &e else {
                    return Err(e);
                };

                let v = config::Value::new(None, ValueKind::Table(Default::default()));

                match T::deserialize(v) {
                    Ok(o) => Ok(o),
                    Err(_) => Err(e),
                }
            }
        }
    }
}

impl Deref for Config {
    type Target = config::Config;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub trait ConfigPrefix {
    const PREFIX: &'static str;
}

fn default_folder() -> PathBuf {
    let mut parent = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_default(),
    };

    parent.push("config");
    parent
}

//! Layered options loading: optional file, then environment overrides.

use client_core::{Error, Result};

use crate::options::ClientOptions;

/// Default environment prefix for overrides (`CLICKHOUSE__HOST`, ...).
pub const DEFAULT_ENV_PREFIX: &str = "CLICKHOUSE";

/// Loads client options from an optional TOML file and environment
/// variables with the given prefix.
///
/// Missing sources contribute nothing; environment values override file
/// values. The result is a partial [`ClientOptions`]; resolution over the
/// defaults still happens in [`crate::ClientConfig::resolve`].
pub fn load_options(file: Option<&str>, env_prefix: &str) -> Result<ClientOptions> {
    let mut builder = config::Config::builder();

    if let Some(path) = file {
        builder = builder.add_source(
            config::File::with_name(path)
                .required(false)
                .format(config::FileFormat::Toml),
        );
    }

    let source = builder
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix(env_prefix)
                .try_parsing(true),
        )
        .build()
        .map_err(|e| Error::load(e.to_string()))?;

    source
        .try_deserialize()
        .map_err(|e| Error::load(e.to_string()))
}

//! Client options and the resolved configuration.
//!
//! Two-layer shape: [`ClientOptions`] is the caller-facing partial value
//! where every field may be omitted, [`ClientConfig`] is the resolved value
//! where every default-bearing field is concrete. [`ClientConfig::resolve`]
//! is the only conversion between them.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use client_core::{
    CompressionMethod, ConnectionProtocol, DataFormat, Error, QuerySettings, QuerySettingsUpdate,
    Result,
};

use crate::capability::{ConnectionProvider, LogSink, TracingSink};

fn default_name() -> String {
    "DEFAULT".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8123
}

fn default_username() -> String {
    "default".to_string()
}

fn default_database() -> String {
    "default".to_string()
}

const PORT_RANGE: &str = "1..=65535";

/// Partially specified client options.
///
/// Any subset of fields may be supplied; the rest resolve to the documented
/// defaults. Capability fields are skipped on the deserialized path and can
/// only be attached programmatically.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    /// Connection profile label, used for logging and metrics.
    pub name: Option<String>,
    pub host: Option<String>,
    /// Wider than the resolved port so out-of-range values are rejected by
    /// resolution rather than at the type boundary.
    pub port: Option<u32>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
    pub protocol: Option<ConnectionProtocol>,
    pub compression: Option<CompressionMethod>,
    pub format: Option<DataFormat>,
    /// Partial settings override, merged field-by-field over the defaults.
    pub settings: QuerySettingsUpdate,
    /// Pooled-connection provider used when the resolved protocol is HTTP.
    #[serde(skip)]
    pub http_agent: Option<Arc<dyn ConnectionProvider>>,
    /// Pooled-connection provider used when the resolved protocol is HTTPS.
    #[serde(skip)]
    pub https_agent: Option<Arc<dyn ConnectionProvider>>,
    /// Log sink; defaults to the process's tracing-backed sink.
    #[serde(skip)]
    pub logger: Option<Arc<dyn LogSink>>,
}

impl ClientOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_port(mut self, port: u32) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn with_protocol(mut self, protocol: ConnectionProtocol) -> Self {
        self.protocol = Some(protocol);
        self
    }

    pub fn with_compression(mut self, compression: CompressionMethod) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn with_format(mut self, format: DataFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_settings(mut self, settings: QuerySettingsUpdate) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_http_agent(mut self, agent: Arc<dyn ConnectionProvider>) -> Self {
        self.http_agent = Some(agent);
        self
    }

    pub fn with_https_agent(mut self, agent: Arc<dyn ConnectionProvider>) -> Self {
        self.https_agent = Some(agent);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn LogSink>) -> Self {
        self.logger = Some(logger);
        self
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("name", &self.name)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password)
            .field("database", &self.database)
            .field("protocol", &self.protocol)
            .field("compression", &self.compression)
            .field("format", &self.format)
            .field("settings", &self.settings)
            .field("http_agent", &self.http_agent.is_some())
            .field("https_agent", &self.https_agent.is_some())
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

/// Fully resolved client configuration.
///
/// Every default-bearing field is concrete. Treat as read-only after
/// resolution; the settings profile is owned by value and never shared
/// between configurations.
#[derive(Clone)]
pub struct ClientConfig {
    pub name: String,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    pub protocol: ConnectionProtocol,
    pub compression: CompressionMethod,
    pub format: DataFormat,
    pub settings: QuerySettings,
    /// Provider for the resolved protocol, when the caller supplied one.
    pub agent: Option<Arc<dyn ConnectionProvider>>,
    pub logger: Arc<dyn LogSink>,
}

impl Default for ClientConfig {
    /// Canonical defaults; a fresh value on every call, never a shared
    /// template.
    fn default() -> Self {
        Self {
            name: default_name(),
            host: default_host(),
            port: default_port(),
            username: default_username(),
            password: String::new(),
            database: default_database(),
            protocol: ConnectionProtocol::default(),
            compression: CompressionMethod::default(),
            format: DataFormat::default(),
            settings: QuerySettings::default(),
            agent: None,
            logger: Arc::new(TracingSink),
        }
    }
}

impl ClientConfig {
    /// Resolves partial options over fresh defaults.
    ///
    /// Supplied fields overwrite the defaults; absent fields keep them.
    /// The nested settings merge is field-level, so a partial settings
    /// object never erases sibling fields. Fails outright on the first
    /// invalid field; never clamps, never logs-and-continues.
    pub fn resolve(options: ClientOptions) -> Result<Self> {
        let defaults = Self::default();

        let protocol = options.protocol.unwrap_or(defaults.protocol);

        let port = match options.port {
            Some(raw) => u16::try_from(raw)
                .ok()
                .filter(|port| *port >= 1)
                .ok_or_else(|| Error::configuration("port", raw.to_string(), PORT_RANGE))?,
            None => defaults.port,
        };

        let settings = defaults.settings.merged(&options.settings)?;

        // Only the provider matching the resolved protocol is kept; a
        // provider declaring a different protocol is a misconfiguration.
        let agent = match protocol {
            ConnectionProtocol::Http => options.http_agent,
            ConnectionProtocol::Https => options.https_agent,
        };
        if let Some(provider) = &agent {
            if provider.protocol() != protocol {
                return Err(Error::configuration(
                    "agent",
                    provider.protocol().as_str(),
                    protocol.as_str(),
                ));
            }
        }

        Ok(Self {
            name: options.name.unwrap_or(defaults.name),
            host: options.host.unwrap_or(defaults.host),
            port,
            username: options.username.unwrap_or(defaults.username),
            password: options.password.unwrap_or(defaults.password),
            database: options.database.unwrap_or(defaults.database),
            protocol,
            compression: options.compression.unwrap_or(defaults.compression),
            format: options.format.unwrap_or(defaults.format),
            settings,
            agent,
            logger: options.logger.unwrap_or(defaults.logger),
        })
    }

    /// Projects the resolved configuration back into options form.
    ///
    /// Resolving the projection yields an identical configuration.
    pub fn as_options(&self) -> ClientOptions {
        let (http_agent, https_agent) = match self.protocol {
            ConnectionProtocol::Http => (self.agent.clone(), None),
            ConnectionProtocol::Https => (None, self.agent.clone()),
        };
        ClientOptions {
            name: Some(self.name.clone()),
            host: Some(self.host.clone()),
            port: Some(u32::from(self.port)),
            username: Some(self.username.clone()),
            password: Some(self.password.clone()),
            database: Some(self.database.clone()),
            protocol: Some(self.protocol),
            compression: Some(self.compression),
            format: Some(self.format),
            settings: self.settings.as_update(),
            http_agent,
            https_agent,
            logger: Some(self.logger.clone()),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("name", &self.name)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password)
            .field("database", &self.database)
            .field("protocol", &self.protocol)
            .field("compression", &self.compression)
            .field("format", &self.format)
            .field("settings", &self.settings)
            .field("agent", &self.agent.is_some())
            .finish()
    }
}

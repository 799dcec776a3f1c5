//! Client facade over a resolved configuration.

use serde::Serialize;

use client_core::Result;

use crate::capability::LogLevel;
use crate::options::{ClientConfig, ClientOptions};
use crate::request::{self, HttpRequest};

/// ClickHouse HTTP client: a resolved configuration plus request
/// composition.
///
/// Performs no network I/O; composed requests are handed to the caller's
/// transport, optionally through the configured connection provider.
#[derive(Clone)]
pub struct Client {
    config: ClientConfig,
}

impl Client {
    /// Resolves `options` over the defaults and builds a client.
    pub fn new(options: ClientOptions) -> Result<Self> {
        let config = ClientConfig::resolve(options)?;
        config.logger.emit(
            LogLevel::Info,
            &format!(
                "[{}] ClickHouse HTTP client ready: {}://{}:{}/{}",
                config.name,
                config.protocol.scheme(),
                config.host,
                config.port,
                config.database
            ),
        );
        Ok(Self { config })
    }

    /// The resolved configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Composes a statement request against the configured endpoint.
    pub fn query_request(&self, statement: &str) -> Result<HttpRequest> {
        let request = request::query(&self.config, statement)?;
        self.config.logger.emit(
            LogLevel::Debug,
            &format!("[{}] composed query request", self.config.name),
        );
        Ok(request)
    }

    /// Composes a JSONEachRow insert request for `rows`.
    pub fn insert_request<T: Serialize>(&self, table: &str, rows: &[T]) -> Result<HttpRequest> {
        let request = request::insert(&self.config, table, rows)?;
        self.config.logger.emit(
            LogLevel::Debug,
            &format!(
                "[{}] composed insert request for {} ({} rows)",
                self.config.name,
                table,
                rows.len()
            ),
        );
        Ok(request)
    }

    /// Composes the `/ping` liveness request.
    pub fn ping_request(&self) -> Result<HttpRequest> {
        request::ping(&self.config)
    }
}

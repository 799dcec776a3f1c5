//! Injectable transport and logging capabilities.
//!
//! Both traits are deliberately narrow so a resolved configuration stays
//! transport-agnostic: the client layer holds them by reference and never
//! mutates them.

use client_core::ConnectionProtocol;
use tracing::{debug, error, info, warn};

/// Pooled-connection provider for one transport protocol.
///
/// The client layer never opens sockets itself; a provider supplied in the
/// options travels with the resolved configuration so the transport layer
/// can reuse its pool. Exactly one provider is meaningful per resolved
/// protocol.
pub trait ConnectionProvider: Send + Sync {
    /// Protocol this provider's pool serves.
    fn protocol(&self) -> ConnectionProtocol;
}

/// Severity levels understood by [`LogSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
}

/// Leveled message sink.
pub trait LogSink: Send + Sync {
    fn emit(&self, level: LogLevel, message: &str);
}

/// Default sink: forwards each level to the corresponding `tracing` macro.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Error => error!("{message}"),
            LogLevel::Warn => warn!("{message}"),
            LogLevel::Info => info!("{message}"),
            LogLevel::Debug => debug!("{message}"),
        }
    }
}

//! ClickHouse HTTP client: configuration resolution and request
//! composition.
//!
//! This crate turns a partially specified [`ClientOptions`] into a fully
//! resolved [`ClientConfig`] and projects it, together with a statement,
//! into ready-to-send [`HttpRequest`] values. It performs no network I/O;
//! transports plug in through the [`ConnectionProvider`] capability.

pub mod capability;
pub mod client;
pub mod load;
pub mod options;
pub mod request;

pub use capability::{ConnectionProvider, LogLevel, LogSink, TracingSink};
pub use client::Client;
pub use load::load_options;
pub use options::{ClientConfig, ClientOptions};
pub use request::{HttpMethod, HttpRequest};

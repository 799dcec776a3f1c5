//! Core types for the ClickHouse HTTP client: wire enums, the query
//! settings profile, and the unified error type.

pub mod error;
pub mod settings;
pub mod wire;

pub use error::{Error, Result};
pub use settings::*;
pub use wire::*;

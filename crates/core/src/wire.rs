//! Wire-level enums for the ClickHouse HTTP interface.
//!
//! String forms are the upper-case spellings the server understands.
//! Parsing an unrecognized spelling fails with a configuration error that
//! names the field and the accepted set, and the serde impls route through
//! the same parsing so deserialized input gets identical rejects.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Transport protocol of the HTTP interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConnectionProtocol {
    #[default]
    Http,
    Https,
}

impl ConnectionProtocol {
    /// Accepted wire spellings.
    pub const ACCEPTED: &'static [&'static str] = &["HTTP", "HTTPS"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "HTTP",
            Self::Https => "HTTPS",
        }
    }

    /// URL scheme for this protocol.
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    /// Parse a wire spelling.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "HTTP" => Ok(Self::Http),
            "HTTPS" => Ok(Self::Https),
            other => Err(Error::configuration(
                "protocol",
                other,
                Self::ACCEPTED.join(", "),
            )),
        }
    }
}

/// Compression method negotiated with the server.
///
/// Only identity and gzip are negotiated end-to-end by the request layer;
/// deflate and brotli are accepted and encoded into `Accept-Encoding` but
/// carry no further guarantee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompressionMethod {
    #[default]
    None,
    Gzip,
    Deflate,
    Brotli,
}

impl CompressionMethod {
    /// Accepted wire spellings.
    pub const ACCEPTED: &'static [&'static str] = &["NONE", "GZIP", "DEFLATE", "BROTLI"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Gzip => "GZIP",
            Self::Deflate => "DEFLATE",
            Self::Brotli => "BROTLI",
        }
    }

    /// `Accept-Encoding` token, if this method requests one.
    pub fn accept_encoding(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Gzip => Some("gzip"),
            Self::Deflate => Some("deflate"),
            Self::Brotli => Some("br"),
        }
    }

    /// Parse a wire spelling.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "NONE" => Ok(Self::None),
            "GZIP" => Ok(Self::Gzip),
            "DEFLATE" => Ok(Self::Deflate),
            "BROTLI" => Ok(Self::Brotli),
            other => Err(Error::configuration(
                "compression",
                other,
                Self::ACCEPTED.join(", "),
            )),
        }
    }
}

/// Input/output data format.
///
/// The full set is accepted and projected into composed requests verbatim,
/// but only `JSON` is guaranteed end-to-end by the surrounding layers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DataFormat {
    #[default]
    Json,
    JsonCompact,
    JsonEachRow,
    Csv,
    TabSeparated,
}

impl DataFormat {
    /// Accepted wire spellings.
    pub const ACCEPTED: &'static [&'static str] =
        &["JSON", "JSONCompact", "JSONEachRow", "CSV", "TabSeparated"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::JsonCompact => "JSONCompact",
            Self::JsonEachRow => "JSONEachRow",
            Self::Csv => "CSV",
            Self::TabSeparated => "TabSeparated",
        }
    }

    /// Parse a wire spelling.
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "JSON" => Ok(Self::Json),
            "JSONCompact" => Ok(Self::JsonCompact),
            "JSONEachRow" => Ok(Self::JsonEachRow),
            "CSV" => Ok(Self::Csv),
            "TabSeparated" => Ok(Self::TabSeparated),
            other => Err(Error::configuration(
                "format",
                other,
                Self::ACCEPTED.join(", "),
            )),
        }
    }
}

macro_rules! wire_serde {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                let value = String::deserialize(deserializer)?;
                Self::parse(&value).map_err(de::Error::custom)
            }
        }
    };
}

wire_serde!(ConnectionProtocol);
wire_serde!(CompressionMethod);
wire_serde!(DataFormat);

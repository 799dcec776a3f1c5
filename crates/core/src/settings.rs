//! Server-side query execution settings.
//!
//! These map one-to-one onto URL parameters of the ClickHouse HTTP
//! interface. Flags keep the server's 0|1 domain rather than `bool` so a
//! deserialized out-of-domain value is a reportable reject, not a silent
//! coercion.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default response buffer threshold in bytes (1 MiB).
pub const DEFAULT_BUFFER_SIZE: u64 = 1_048_576;

/// Resolved settings profile. Every field carries a concrete value.
///
/// Construction goes through [`QuerySettings::default`] or
/// [`QuerySettings::merged`]; downstream layers treat the value as
/// read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySettings {
    /// Emit X-ClickHouse-Progress response headers during execution (0|1).
    #[serde(default = "default_send_progress")]
    pub send_progress_in_http_headers: u8,
    /// Fully buffer the result on the server before replying (0|1).
    #[serde(default = "default_wait_end_of_query")]
    pub wait_end_of_query: u8,
    /// Bytes of the result to buffer in server memory.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: u64,
}

fn default_send_progress() -> u8 {
    0
}

fn default_wait_end_of_query() -> u8 {
    1
}

fn default_buffer_size() -> u64 {
    DEFAULT_BUFFER_SIZE
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            send_progress_in_http_headers: default_send_progress(),
            wait_end_of_query: default_wait_end_of_query(),
            buffer_size: default_buffer_size(),
        }
    }
}

/// Partial settings override; absent fields keep the already-resolved
/// values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySettingsUpdate {
    pub send_progress_in_http_headers: Option<u8>,
    pub wait_end_of_query: Option<u8>,
    pub buffer_size: Option<u64>,
}

impl QuerySettings {
    /// Field-level merge: start from `self`, overwrite only the fields the
    /// update carries, validate the result.
    pub fn merged(&self, update: &QuerySettingsUpdate) -> Result<QuerySettings> {
        let resolved = QuerySettings {
            send_progress_in_http_headers: update
                .send_progress_in_http_headers
                .unwrap_or(self.send_progress_in_http_headers),
            wait_end_of_query: update.wait_end_of_query.unwrap_or(self.wait_end_of_query),
            buffer_size: update.buffer_size.unwrap_or(self.buffer_size),
        };
        resolved.validate()?;
        Ok(resolved)
    }

    /// Validates flag domains and the buffer threshold.
    pub fn validate(&self) -> Result<()> {
        validate_flag(
            "send_progress_in_http_headers",
            self.send_progress_in_http_headers,
        )?;
        validate_flag("wait_end_of_query", self.wait_end_of_query)?;
        if self.buffer_size == 0 {
            return Err(Error::settings(
                "buffer_size",
                0,
                "buffer threshold must be positive",
            ));
        }
        Ok(())
    }

    /// Projects the resolved profile back into update form.
    pub fn as_update(&self) -> QuerySettingsUpdate {
        QuerySettingsUpdate {
            send_progress_in_http_headers: Some(self.send_progress_in_http_headers),
            wait_end_of_query: Some(self.wait_end_of_query),
            buffer_size: Some(self.buffer_size),
        }
    }
}

fn validate_flag(field: &'static str, value: u8) -> Result<()> {
    if value > 1 {
        return Err(Error::settings(field, u64::from(value), "flag must be 0 or 1"));
    }
    Ok(())
}

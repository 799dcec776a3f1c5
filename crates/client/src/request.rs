//! Request composition for the ClickHouse HTTP interface.
//!
//! Pure projection of a resolved [`ClientConfig`] plus a statement into an
//! [`HttpRequest`] value. No I/O happens here; the composed request is
//! handed to whatever transport the caller drives.

use bytes::Bytes;
use serde::Serialize;
use url::Url;

use client_core::{CompressionMethod, DataFormat, Error, Result};

use crate::options::ClientConfig;

/// Header carrying the username.
pub const HEADER_USER: &str = "X-ClickHouse-User";
/// Header carrying the password.
pub const HEADER_KEY: &str = "X-ClickHouse-Key";
pub const HEADER_ACCEPT_ENCODING: &str = "Accept-Encoding";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";

const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

/// Method of a composed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A fully composed request, ready for any transport.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<Bytes>,
}

impl HttpRequest {
    /// First value of a header, if present.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// First value of a query parameter, if present.
    pub fn param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

/// Base URL of the configured endpoint: `scheme://host:port/`.
pub fn base_url(config: &ClientConfig) -> Result<Url> {
    let raw = format!(
        "{}://{}:{}/",
        config.protocol.scheme(),
        config.host,
        config.port
    );
    Url::parse(&raw)
        .map_err(|_| Error::configuration("host", config.host.clone(), "a hostname valid in a URL"))
}

/// Composes a statement request: POST against the endpoint with the
/// statement (carrying a FORMAT clause) as the body.
pub fn query(config: &ClientConfig, statement: &str) -> Result<HttpRequest> {
    let mut url = base_url(config)?;
    append_params(&mut url, config);

    let mut headers = common_headers(config);
    headers.push((HEADER_CONTENT_TYPE, CONTENT_TYPE_TEXT.to_string()));

    let body = format_statement(statement, config.format);
    Ok(HttpRequest {
        method: HttpMethod::Post,
        url,
        headers,
        body: Some(Bytes::from(body)),
    })
}

/// Composes a row insert: `INSERT INTO <table> FORMAT JSONEachRow` with one
/// JSON-encoded row per line.
///
/// JSONEachRow is the insert wire format regardless of the configured read
/// format.
pub fn insert<T: Serialize>(config: &ClientConfig, table: &str, rows: &[T]) -> Result<HttpRequest> {
    let mut url = base_url(config)?;
    append_params(&mut url, config);

    let mut headers = common_headers(config);
    headers.push((HEADER_CONTENT_TYPE, CONTENT_TYPE_TEXT.to_string()));

    let mut body = format!(
        "INSERT INTO {} FORMAT {}\n",
        table,
        DataFormat::JsonEachRow.as_str()
    );
    for row in rows {
        body.push_str(&serde_json::to_string(row)?);
        body.push('\n');
    }

    Ok(HttpRequest {
        method: HttpMethod::Post,
        url,
        headers,
        body: Some(Bytes::from(body)),
    })
}

/// Composes the `/ping` liveness request: bare GET, no parameters or
/// credentials.
pub fn ping(config: &ClientConfig) -> Result<HttpRequest> {
    let mut url = base_url(config)?;
    url.set_path("/ping");
    Ok(HttpRequest {
        method: HttpMethod::Get,
        url,
        headers: Vec::new(),
        body: None,
    })
}

/// Query-string parameters derived from the configuration, in a
/// deterministic order.
fn append_params(url: &mut Url, config: &ClientConfig) {
    let settings = &config.settings;
    let mut pairs = url.query_pairs_mut();
    pairs.append_pair("database", &config.database);
    pairs.append_pair(
        "send_progress_in_http_headers",
        &settings.send_progress_in_http_headers.to_string(),
    );
    pairs.append_pair("wait_end_of_query", &settings.wait_end_of_query.to_string());
    pairs.append_pair("buffer_size", &settings.buffer_size.to_string());
    if config.compression != CompressionMethod::None {
        pairs.append_pair("enable_http_compression", "1");
    }
}

/// Credential and negotiation headers shared by statement requests.
fn common_headers(config: &ClientConfig) -> Vec<(&'static str, String)> {
    let mut headers = vec![
        (HEADER_USER, config.username.clone()),
        (HEADER_KEY, config.password.clone()),
    ];
    if let Some(encoding) = config.compression.accept_encoding() {
        headers.push((HEADER_ACCEPT_ENCODING, encoding.to_string()));
    }
    headers
}

/// Appends ` FORMAT <format>` unless the statement already carries a
/// format clause. A trailing semicolon is dropped first; the server does
/// not accept one after the clause.
fn format_statement(statement: &str, format: DataFormat) -> String {
    let trimmed = statement.trim().trim_end_matches(';').trim_end();
    if has_format_clause(trimmed) {
        trimmed.to_string()
    } else {
        format!("{} FORMAT {}", trimmed, format.as_str())
    }
}

fn has_format_clause(statement: &str) -> bool {
    let mut words = statement.split_whitespace().rev();
    let _format_name = words.next();
    matches!(words.next(), Some(word) if word.eq_ignore_ascii_case("FORMAT"))
}

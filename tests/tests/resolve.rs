//! Resolution contract: layered defaults, field-level settings merge,
//! validation failures.

use client_core::{
    CompressionMethod, ConnectionProtocol, DataFormat, Error, QuerySettingsUpdate,
    DEFAULT_BUFFER_SIZE,
};
use clickhouse_http::{ClientConfig, ClientOptions};
use integration_tests::{metrics_options, StaticProvider};

#[test]
fn empty_options_resolve_every_default() {
    let config = ClientConfig::resolve(ClientOptions::new()).unwrap();
    assert_eq!(config.name, "DEFAULT");
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 8123);
    assert_eq!(config.username, "default");
    assert_eq!(config.password, "");
    assert_eq!(config.database, "default");
    assert_eq!(config.protocol, ConnectionProtocol::Http);
    assert_eq!(config.compression, CompressionMethod::None);
    assert_eq!(config.format, DataFormat::Json);
    assert_eq!(config.settings.send_progress_in_http_headers, 0);
    assert_eq!(config.settings.wait_end_of_query, 1);
    assert_eq!(config.settings.buffer_size, DEFAULT_BUFFER_SIZE);
    assert!(config.agent.is_none());
}

#[test]
fn example_profile_resolves_to_documented_values() {
    let config = ClientConfig::resolve(metrics_options()).unwrap();
    assert_eq!(config.name, "DEFAULT");
    assert_eq!(config.host, "db.internal");
    assert_eq!(config.port, 8443);
    assert_eq!(config.username, "default");
    assert_eq!(config.password, "");
    assert_eq!(config.database, "metrics");
    assert_eq!(config.protocol, ConnectionProtocol::Https);
    assert_eq!(config.compression, CompressionMethod::None);
    assert_eq!(config.format, DataFormat::Json);
    assert_eq!(config.settings.send_progress_in_http_headers, 0);
    assert_eq!(config.settings.wait_end_of_query, 1);
    assert_eq!(config.settings.buffer_size, 1_048_576);
}

#[test]
fn partial_settings_keep_sibling_defaults() {
    let options = ClientOptions::new().with_settings(QuerySettingsUpdate {
        buffer_size: Some(2048),
        ..Default::default()
    });
    let settings = ClientConfig::resolve(options).unwrap().settings;
    assert_eq!(settings.send_progress_in_http_headers, 0);
    assert_eq!(settings.wait_end_of_query, 1);
    assert_eq!(settings.buffer_size, 2048);
}

#[test]
fn resolved_configs_share_no_settings_storage() {
    let mut first = ClientConfig::resolve(ClientOptions::new()).unwrap();
    let second = ClientConfig::resolve(ClientOptions::new()).unwrap();
    first.settings.buffer_size = 1;
    assert_eq!(second.settings.buffer_size, DEFAULT_BUFFER_SIZE);
}

#[test]
fn re_resolving_a_resolved_config_is_a_no_op() {
    let once = ClientConfig::resolve(metrics_options()).unwrap();
    let twice = ClientConfig::resolve(once.as_options()).unwrap();
    assert_eq!(once.host, twice.host);
    assert_eq!(once.port, twice.port);
    assert_eq!(once.database, twice.database);
    assert_eq!(once.protocol, twice.protocol);
    assert_eq!(once.settings, twice.settings);
}

#[test]
fn out_of_range_port_is_a_configuration_error() {
    let err = ClientConfig::resolve(ClientOptions::new().with_port(70_000)).unwrap_err();
    match err {
        Error::InvalidConfiguration { field, value, .. } => {
            assert_eq!(field, "port");
            assert_eq!(value, "70000");
        }
        other => panic!("expected configuration error, got {other}"),
    }
}

#[test]
fn zero_buffer_size_is_a_settings_error() {
    let options = ClientOptions::new().with_settings(QuerySettingsUpdate {
        buffer_size: Some(0),
        ..Default::default()
    });
    let err = ClientConfig::resolve(options).unwrap_err();
    assert!(matches!(err, Error::InvalidSettings { field: "buffer_size", .. }));
}

#[test]
fn unknown_protocol_spelling_lists_accepted_set() {
    let err = ConnectionProtocol::parse("FTP").unwrap_err();
    match err {
        Error::InvalidConfiguration {
            field,
            value,
            accepted,
        } => {
            assert_eq!(field, "protocol");
            assert_eq!(value, "FTP");
            assert!(accepted.contains("HTTP"));
            assert!(accepted.contains("HTTPS"));
        }
        other => panic!("expected configuration error, got {other}"),
    }
}

#[test]
fn string_options_resolve_through_serde() {
    let options: ClientOptions = serde_json::from_str(
        r#"{
            "host": "db.internal",
            "port": 8443,
            "protocol": "HTTPS",
            "database": "metrics",
            "compression": "GZIP",
            "settings": {"wait_end_of_query": 0}
        }"#,
    )
    .unwrap();
    let config = ClientConfig::resolve(options).unwrap();
    assert_eq!(config.protocol, ConnectionProtocol::Https);
    assert_eq!(config.compression, CompressionMethod::Gzip);
    assert_eq!(config.settings.wait_end_of_query, 0);
    assert_eq!(config.settings.buffer_size, DEFAULT_BUFFER_SIZE);
}

#[test]
fn unknown_spelling_is_rejected_on_the_serde_path() {
    let err = serde_json::from_str::<ClientOptions>(r#"{"protocol": "FTP"}"#).unwrap_err();
    assert!(err.to_string().contains("HTTP, HTTPS"));
}

#[test]
fn provider_for_the_resolved_protocol_is_kept() {
    let options = metrics_options()
        .with_http_agent(StaticProvider::new(ConnectionProtocol::Http))
        .with_https_agent(StaticProvider::new(ConnectionProtocol::Https));
    let config = ClientConfig::resolve(options).unwrap();
    let agent = config.agent.expect("provider kept");
    assert_eq!(agent.protocol(), ConnectionProtocol::Https);
}

#[test]
fn provider_for_the_other_protocol_is_discarded() {
    let options =
        ClientOptions::new().with_https_agent(StaticProvider::new(ConnectionProtocol::Https));
    let config = ClientConfig::resolve(options).unwrap();
    assert!(config.agent.is_none());
}

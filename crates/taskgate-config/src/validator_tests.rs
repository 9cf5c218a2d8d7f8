use super::*;
use crate::schema::{BackendsConfig, ClientTlsConfig};
use std::path::PathBuf;

fn valid_config() -> Config {
    Config {
        backends: BackendsConfig {
            agent: EndpointConfig::new("agent:50051"),
            data_provider: EndpointConfig::new("data-provider:50051"),
            ..BackendsConfig::default()
        },
        ..Config::default()
    }
}

fn tls_endpoint(addr: &str) -> EndpointConfig {
    EndpointConfig {
        use_tls: true,
        server_name: Some("backend.internal".to_string()),
        ..EndpointConfig::new(addr)
    }
}

#[test]
fn test_valid_config() {
    let result = ConfigValidator::validate(&valid_config());
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_default_config_missing_addresses() {
    let result = ConfigValidator::validate(&Config::default());
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "backends.agent.addr"));
    assert!(result.errors.iter().any(|e| e.path == "backends.data_provider.addr"));
}

#[test]
fn test_invalid_listen_addr() {
    let mut config = valid_config();
    config.gateway.http.addr = "not-an-address".to_string();
    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "gateway.http.addr"));
}

#[test]
fn test_zero_listen_port() {
    let mut config = valid_config();
    config.gateway.http.addr = "127.0.0.1:0".to_string();
    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
}

#[test]
fn test_negative_max_difficulty() {
    let mut config = valid_config();
    config.gateway.max_difficulty = -1;
    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "gateway.max_difficulty"));
}

#[test]
fn test_zero_grace_is_warning() {
    let mut config = valid_config();
    config.gateway.shutdown_grace_secs = 0;
    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result
        .warnings
        .iter()
        .any(|w| w.path == "gateway.shutdown_grace_secs"));
}

#[test]
fn test_tls_requires_ca() {
    let mut config = valid_config();
    config.backends.agent = tls_endpoint("agent:50051");
    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "backends.tls.ca_cert"));
}

#[test]
fn test_tls_with_ca_is_valid() {
    let mut config = valid_config();
    config.backends.agent = tls_endpoint("agent:50051");
    config.backends.tls = ClientTlsConfig {
        ca_cert: Some(PathBuf::from("/etc/taskgate/ca.pem")),
        client_cert: Some(PathBuf::from("/etc/taskgate/client.pem")),
        client_key: Some(PathBuf::from("/etc/taskgate/client.key")),
    };
    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid(), "{:?}", result.errors);
}

#[test]
fn test_client_cert_without_key() {
    let mut config = valid_config();
    config.backends.agent = tls_endpoint("agent:50051");
    config.backends.tls = ClientTlsConfig {
        ca_cert: Some(PathBuf::from("/ca.pem")),
        client_cert: Some(PathBuf::from("/client.pem")),
        client_key: None,
    };
    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "backends.tls.client_key"));
}

#[test]
fn test_tls_with_http_scheme_conflict() {
    let mut config = valid_config();
    config.backends.agent = tls_endpoint("http://agent:8080");
    config.backends.tls.ca_cert = Some(PathBuf::from("/ca.pem"));
    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "backends.agent.addr"));
}

#[test]
fn test_server_name_without_tls_warns() {
    let mut config = valid_config();
    config.backends.agent.server_name = Some("agent.internal".to_string());
    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result
        .warnings
        .iter()
        .any(|w| w.path == "backends.agent.server_name"));
}

#[test]
fn test_server_name_with_tls_is_quiet_for_http() {
    let mut config = valid_config();
    config.backends.transport = crate::schema::Transport::Http;
    config.backends.agent = tls_endpoint("agent:8443");
    config.backends.tls.ca_cert = Some(PathBuf::from("/etc/taskgate/ca.pem"));
    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_issue_display() {
    let issue = ValidationIssue {
        path: "gateway.http.addr".to_string(),
        message: "Port cannot be 0".to_string(),
    };
    assert_eq!(issue.to_string(), "gateway.http.addr: Port cannot be 0");
}

#[test]
fn test_zero_request_timeout() {
    let mut config = valid_config();
    config.backends.data_provider.request_timeout_secs = Some(0);
    let result = ConfigValidator::validate(&config);
    assert!(result
        .errors
        .iter()
        .any(|e| e.path == "backends.data_provider.request_timeout_secs"));
}

#[test]
fn test_into_result_joins_errors() {
    let result = ConfigValidator::validate(&Config::default());
    let err = result.into_result().unwrap_err();
    let display = err.to_string();
    assert!(display.contains("backends.agent.addr"));
    assert!(display.contains("backends.data_provider.addr"));
}

#[test]
fn test_into_result_returns_warnings() {
    let mut config = valid_config();
    config.backends.tls.ca_cert = Some(PathBuf::from("/ca.pem"));
    let warnings = ConfigValidator::validate(&config).into_result().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].path, "backends.tls");
}

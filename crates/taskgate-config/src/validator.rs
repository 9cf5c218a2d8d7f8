//! Configuration validation.

use std::fmt;
use std::net::SocketAddr;

use crate::error::ConfigError;
use crate::schema::{Config, EndpointConfig};

/// One finding, keyed by the dotted path of the offending setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Errors block startup; warnings are only logged.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationIssue {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ValidationIssue {
            path: path.into(),
            message: message.into(),
        });
    }

    /// Hand back the warnings, or fold every error into one
    /// [`ConfigError::Invalid`].
    pub fn into_result(self) -> Result<Vec<ValidationIssue>, ConfigError> {
        if self.is_valid() {
            return Ok(self.warnings);
        }
        let message = self
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(ConfigError::Invalid(message))
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_gateway(config, &mut result);
        Self::validate_endpoint("backends.agent", &config.backends.agent, &mut result);
        Self::validate_endpoint(
            "backends.data_provider",
            &config.backends.data_provider,
            &mut result,
        );
        Self::validate_tls(config, &mut result);

        result
    }

    fn validate_gateway(config: &Config, result: &mut ValidationResult) {
        match config.gateway.http.addr.parse::<SocketAddr>() {
            Ok(addr) if addr.port() == 0 => result.error("gateway.http.addr", "Port cannot be 0"),
            Ok(_) => {}
            Err(e) => result.error("gateway.http.addr", format!("Not a socket address: {e}")),
        }

        if config.gateway.max_difficulty < 0 {
            result.error(
                "gateway.max_difficulty",
                "max_difficulty cannot be negative",
            );
        }

        if config.gateway.shutdown_grace_secs == 0 {
            result.warn(
                "gateway.shutdown_grace_secs",
                "Grace period is 0, in-flight requests will be cut off on shutdown",
            );
        }
    }

    fn validate_endpoint(path: &str, endpoint: &EndpointConfig, result: &mut ValidationResult) {
        if endpoint.addr.trim().is_empty() {
            result.error(format!("{path}.addr"), "Address cannot be empty");
        }

        if endpoint.connect_timeout_secs == 0 {
            result.error(
                format!("{path}.connect_timeout_secs"),
                "connect_timeout_secs must be greater than 0",
            );
        }

        if endpoint.request_timeout_secs == Some(0) {
            result.error(
                format!("{path}.request_timeout_secs"),
                "request_timeout_secs must be greater than 0, or null to disable",
            );
        }

        if !endpoint.use_tls && endpoint.server_name.is_some() {
            result.warn(
                format!("{path}.server_name"),
                "server_name only applies when use_tls is enabled",
            );
        }

        if endpoint.use_tls && endpoint.url().starts_with("http://") {
            result.error(
                format!("{path}.addr"),
                "use_tls is set but the address has an http:// scheme",
            );
        }
    }

    fn validate_tls(config: &Config, result: &mut ValidationResult) {
        let backends = &config.backends;
        let tls = &backends.tls;
        let any_tls = backends.agent.use_tls || backends.data_provider.use_tls;

        if any_tls && tls.ca_cert.is_none() {
            result.error(
                "backends.tls.ca_cert",
                "A CA certificate is required when a backend uses TLS",
            );
        }

        match (&tls.client_cert, &tls.client_key) {
            (Some(_), None) => result.error(
                "backends.tls.client_key",
                "client_cert is set without client_key",
            ),
            (None, Some(_)) => result.error(
                "backends.tls.client_cert",
                "client_key is set without client_cert",
            ),
            _ => {}
        }

        if !any_tls && (tls.ca_cert.is_some() || tls.client_cert.is_some()) {
            result.warn(
                "backends.tls",
                "TLS material is configured but no backend has use_tls enabled",
            );
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;

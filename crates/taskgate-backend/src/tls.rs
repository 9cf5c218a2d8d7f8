//! Client TLS material.
//!
//! Certificates are read once at startup. Only the PEM framing is checked
//! here; the transports parse the DER contents when they build their
//! connectors, and both failures are startup errors.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use taskgate_config::ClientTlsConfig;

use crate::error::StartupError;

const CERTIFICATE_MARKER: &str = "-----BEGIN CERTIFICATE-----";
const PRIVATE_KEY_SUFFIX: &str = "PRIVATE KEY-----";

/// Client certificate chain and private key, both PEM encoded.
#[derive(Clone)]
pub struct ClientIdentity {
    pub cert_pem: Vec<u8>,
    pub key_pem: Vec<u8>,
}

impl ClientIdentity {
    /// Certificate chain followed by the key, the bundle format reqwest expects.
    pub fn pem_bundle(&self) -> Vec<u8> {
        let mut bundle = self.cert_pem.clone();
        if !bundle.ends_with(b"\n") {
            bundle.push(b'\n');
        }
        bundle.extend_from_slice(&self.key_pem);
        bundle
    }
}

impl std::fmt::Debug for ClientIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientIdentity")
            .field("cert_pem", &format_args!("{} bytes", self.cert_pem.len()))
            .field("key_pem", &"<redacted>")
            .finish()
    }
}

/// Trust anchors plus an optional identity for mutual TLS.
#[derive(Debug, Clone)]
pub struct TlsMaterial {
    pub ca_pem: Vec<u8>,
    pub identity: Option<ClientIdentity>,
}

impl TlsMaterial {
    /// Read the configured CA and, when both halves are configured, the client
    /// certificate/key pair.
    ///
    /// Returns `Ok(None)` when no CA is configured.
    pub fn load(config: &ClientTlsConfig) -> Result<Option<Self>, StartupError> {
        let Some(ca_path) = &config.ca_cert else {
            return Ok(None);
        };

        let ca_pem = read_pem(ca_path, "CA certificate", CERTIFICATE_MARKER)?;
        debug!(path = %ca_path.display(), "Loaded CA certificate");

        let identity = match (&config.client_cert, &config.client_key) {
            (Some(cert_path), Some(key_path)) => {
                let cert_pem = read_pem(cert_path, "client certificate", CERTIFICATE_MARKER)?;
                let key_pem = read_pem(key_path, "client key", PRIVATE_KEY_SUFFIX)?;
                debug!(cert = %cert_path.display(), "Loaded client identity");
                Some(ClientIdentity { cert_pem, key_pem })
            }
            _ => None,
        };

        Ok(Some(Self { ca_pem, identity }))
    }

    pub fn has_identity(&self) -> bool {
        self.identity.is_some()
    }
}

fn read_pem(path: &Path, what: &'static str, marker: &str) -> Result<Vec<u8>, StartupError> {
    let bytes = fs::read(path).map_err(|source| StartupError::ReadCertificate {
        what,
        path: PathBuf::from(path),
        source,
    })?;

    let text = String::from_utf8_lossy(&bytes);
    if !text.contains(marker) {
        return Err(StartupError::InvalidCertificate {
            what,
            path: PathBuf::from(path),
            message: format!("no PEM block containing '{marker}'"),
        });
    }

    Ok(bytes)
}

//! Certificate fixtures shared by unit tests.

use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use taskgate_config::ClientTlsConfig;

use crate::tls::TlsMaterial;

/// PEM framing around a truncated DER body.
pub const CORRUPT_CA: &str = "-----BEGIN CERTIFICATE-----\nMIIBkTCB+wIJAKHBfpegPjMC\n-----END CERTIFICATE-----\n";

pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Self-signed CA plus a client identity it issued.
pub fn tls_config() -> ClientTlsConfig {
    ClientTlsConfig {
        ca_cert: Some(fixture("ca.pem")),
        client_cert: Some(fixture("client.pem")),
        client_key: Some(fixture("client.key")),
    }
}

pub fn tls_material() -> TlsMaterial {
    TlsMaterial::load(&tls_config()).unwrap().unwrap()
}

/// A CA file that passes the PEM framing check but does not parse.
pub fn corrupt_ca_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(CORRUPT_CA.as_bytes()).unwrap();
    file
}

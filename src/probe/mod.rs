// Certificate Prober - read the expiry of a domain's leaf certificate
//
// Opens a TCP+TLS connection with chain verification disabled (the point is to
// read the certificate's stated validity window, not to judge trust) and
// returns the leaf certificate's not-after instant. Stateless; the connection
// is dropped on every exit path.

use crate::constants::{PROBE_TIMEOUT, TLS_PORT};
use crate::error::ProbeError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rustls::pki_types::{CertificateDer, ServerName};
use rustls::ClientConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_rustls::TlsConnector;
use x509_parser::prelude::*;

/// Certificate prober trait - the seam between the check loop and the network
#[async_trait]
pub trait CertProber: Send + Sync {
    /// Probe a domain and return its leaf certificate's expiration instant
    async fn probe(&self, domain: &str) -> Result<DateTime<Utc>, ProbeError>;
}

/// TLS prober hitting `domain:443` with a bounded deadline
pub struct TlsProber {
    connector: TlsConnector,
    timeout: Duration,
}

impl TlsProber {
    /// Create a prober with the default 3 second deadline
    pub fn new() -> Self {
        Self::with_timeout(PROBE_TIMEOUT)
    }

    /// Create a prober with a custom deadline
    pub fn with_timeout(timeout: Duration) -> Self {
        let config = ClientConfig::builder()
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(NoVerifier))
            .with_no_client_auth();

        Self {
            connector: TlsConnector::from(Arc::new(config)),
            timeout,
        }
    }
}

impl Default for TlsProber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CertProber for TlsProber {
    async fn probe(&self, domain: &str) -> Result<DateTime<Utc>, ProbeError> {
        let server_name = ServerName::try_from(domain.to_string()).map_err(|_| {
            ProbeError::InvalidServerName {
                domain: domain.to_string(),
            }
        })?;

        let addr = format!("{}:{}", domain, TLS_PORT);

        let handshake = async {
            let tcp = TcpStream::connect(&addr)
                .await
                .map_err(|source| ProbeError::Connection {
                    domain: domain.to_string(),
                    source,
                })?;

            let tls = self
                .connector
                .connect(server_name, tcp)
                .await
                .map_err(|source| ProbeError::Handshake {
                    domain: domain.to_string(),
                    source,
                })?;

            let (_, session) = tls.get_ref();
            let leaf = session
                .peer_certificates()
                .and_then(|certs| certs.first())
                .cloned()
                .ok_or_else(|| ProbeError::NoCertificate {
                    domain: domain.to_string(),
                })?;

            leaf_not_after(domain, &leaf)
        };

        match timeout(self.timeout, handshake).await {
            Ok(result) => result,
            Err(_) => Err(ProbeError::Timeout {
                domain: domain.to_string(),
                timeout: self.timeout,
            }),
        }
    }
}

/// Parse the not-after instant out of a DER-encoded leaf certificate
fn leaf_not_after(domain: &str, der: &CertificateDer<'_>) -> Result<DateTime<Utc>, ProbeError> {
    let (_, cert) =
        X509Certificate::from_der(der.as_ref()).map_err(|e| ProbeError::BadCertificate {
            domain: domain.to_string(),
            details: e.to_string(),
        })?;

    let ts = cert.validity().not_after.timestamp();
    DateTime::from_timestamp(ts, 0).ok_or_else(|| ProbeError::BadCertificate {
        domain: domain.to_string(),
        details: format!("not-after timestamp {ts} out of range"),
    })
}

/// No-op certificate verifier: the prober reads validity, it does not validate
/// trust chains.
#[derive(Debug)]
struct NoVerifier;

impl rustls::client::danger::ServerCertVerifier for NoVerifier {
    fn verify_server_cert(
        &self,
        _end_entity: &rustls::pki_types::CertificateDer<'_>,
        _intermediates: &[rustls::pki_types::CertificateDer<'_>],
        _server_name: &rustls::pki_types::ServerName<'_>,
        _ocsp_response: &[u8],
        _now: rustls::pki_types::UnixTime,
    ) -> std::result::Result<rustls::client::danger::ServerCertVerified, rustls::Error> {
        Ok(rustls::client::danger::ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _message: &[u8],
        _cert: &rustls::pki_types::CertificateDer<'_>,
        _dss: &rustls::DigitallySignedStruct,
    ) -> std::result::Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _message: &[u8],
        _cert: &rustls::pki_types::CertificateDer<'_>,
        _dss: &rustls::DigitallySignedStruct,
    ) -> std::result::Result<rustls::client::danger::HandshakeSignatureValid, rustls::Error> {
        Ok(rustls::client::danger::HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<rustls::SignatureScheme> {
        vec![
            rustls::SignatureScheme::RSA_PKCS1_SHA256,
            rustls::SignatureScheme::ECDSA_NISTP256_SHA256,
            rustls::SignatureScheme::RSA_PKCS1_SHA384,
            rustls::SignatureScheme::ECDSA_NISTP384_SHA384,
            rustls::SignatureScheme::RSA_PKCS1_SHA512,
            rustls::SignatureScheme::ECDSA_NISTP521_SHA512,
            rustls::SignatureScheme::ED25519,
        ]
    }
}

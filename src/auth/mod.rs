//! Authentication strategies: concrete `RequestSigner`s backed by ureq.
//!
//! - `TokenSigner` sends an OAuth bearer token with every request (`token`)
//! - `MutualTlsSigner` presents a client certificate in the handshake (`mtls`)
//!
//! Both share the agent setup below: extra trusted CA certificates, optional
//! skipping of server verification, and a global request timeout.

pub mod mtls;
pub mod token;

pub use mtls::MutualTlsSigner;
pub use token::TokenSigner;

use std::io;
use std::time::Duration;

use ureq::http::{Request, Response};
use ureq::tls::{Certificate, ClientCert, PemItem, RootCerts, TlsConfig};
use ureq::Agent;

use crate::client::TransportError;

/// Connection settings shared by every signer.
#[derive(Debug, Clone, Default)]
pub struct TransportOptions {
    /// PEM bundles of additional CA certificates to trust.
    pub ca_certs: Vec<String>,
    /// Accept any server certificate.
    pub skip_tls_validation: bool,
    /// Upper bound for a whole request, connect through body.
    pub timeout: Option<Duration>,
}

/// Build the ureq agent all signers send through.
pub(crate) fn build_agent(
    options: &TransportOptions,
    client_cert: Option<ClientCert>,
) -> Result<Agent, TransportError> {
    let mut tls = TlsConfig::builder().disable_verification(options.skip_tls_validation);

    if !options.ca_certs.is_empty() {
        let mut roots = Vec::new();
        for bundle in &options.ca_certs {
            roots.extend(parse_certificates(bundle)?);
        }
        tls = tls.root_certs(RootCerts::new_with_certs(&roots));
    }

    if client_cert.is_some() {
        tls = tls.client_cert(client_cert);
    }

    let config = Agent::config_builder()
        .tls_config(tls.build())
        .http_status_as_error(false)
        .timeout_global(options.timeout)
        .build();

    Ok(Agent::new_with_config(config))
}

/// Every certificate in a PEM bundle. An input without any is an error.
pub(crate) fn parse_certificates(
    pem: &str,
) -> Result<Vec<Certificate<'static>>, TransportError> {
    let mut certs = Vec::new();
    for item in ureq::tls::parse_pem(pem.as_bytes()) {
        match item {
            Ok(PemItem::Certificate(cert)) => certs.push(cert.to_owned()),
            Ok(_) => {}
            Err(e) => return Err(TransportError::Tls(format!("invalid PEM: {e}"))),
        }
    }

    if certs.is_empty() {
        return Err(TransportError::Tls("no certificate found in PEM input".into()));
    }

    Ok(certs)
}

/// Send `request` and read the whole body.
pub(crate) fn send(
    agent: &Agent,
    request: Request<()>,
) -> Result<Response<String>, TransportError> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    tracing::debug!(%method, %uri, "sending request");

    let mut response = agent.run(request).map_err(transport_error)?;
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(transport_error)?;

    let status = response.status();
    tracing::debug!(
        status = status.as_u16(),
        bytes = body.len(),
        "received response"
    );

    if !status.is_success() && body.trim().is_empty() {
        return Err(TransportError::Status(status.as_u16()));
    }

    let (parts, _) = response.into_parts();
    Ok(Response::from_parts(parts, body))
}

/// Separate TLS failures from other network failures.
///
/// rustls reports handshake and certificate verification failures as
/// `InvalidData` I/O errors.
fn transport_error(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Tls(msg) => TransportError::Tls(msg.to_string()),
        ureq::Error::Rustls(e) => TransportError::Tls(e.to_string()),
        ureq::Error::Io(e) if e.kind() == io::ErrorKind::InvalidData => {
            TransportError::Tls(e.to_string())
        }
        other => TransportError::Network(other.to_string()),
    }
}

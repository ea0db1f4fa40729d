//! Mutual TLS authentication.
//!
//! No secret is exchanged: the client proves its identity by presenting a
//! certificate (and holding its private key) during the TLS handshake.

use std::fmt;

use ureq::http::{Request, Response};
use ureq::tls::{ClientCert, PrivateKey};
use ureq::Agent;

use super::{build_agent, parse_certificates, send, TransportOptions};
use crate::client::{RequestSigner, TransportError};

/// Sends requests over connections authenticated with a client certificate.
pub struct MutualTlsSigner {
    agent: Agent,
}

impl MutualTlsSigner {
    /// `certificate_pem` may hold a chain; the leaf comes first.
    pub fn new(
        certificate_pem: &str,
        private_key_pem: &str,
        options: &TransportOptions,
    ) -> Result<Self, TransportError> {
        let chain = parse_certificates(certificate_pem)?;
        let key = PrivateKey::from_pem(private_key_pem.as_bytes())
            .map_err(|e| TransportError::Tls(format!("invalid client private key: {e}")))?;

        let client_cert = ClientCert::new_with_certs(&chain, key);
        Ok(Self {
            agent: build_agent(options, Some(client_cert))?,
        })
    }
}

impl RequestSigner for MutualTlsSigner {
    fn execute(&self, request: Request<()>) -> Result<Response<String>, TransportError> {
        send(&self.agent, request)
    }
}

impl fmt::Debug for MutualTlsSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutualTlsSigner").finish_non_exhaustive()
    }
}

//! Bearer-token authentication.

use std::fmt;

use ureq::http::header::AUTHORIZATION;
use ureq::http::{HeaderValue, Request, Response};
use ureq::Agent;
use zeroize::Zeroizing;

use super::{build_agent, send, TransportOptions};
use crate::client::{RequestSigner, TransportError};

/// Sends every request with `Authorization: Bearer <token>`.
///
/// The token is wiped from memory when the signer is dropped.
pub struct TokenSigner {
    agent: Agent,
    token: Zeroizing<String>,
}

impl TokenSigner {
    pub fn new(token: &str, options: &TransportOptions) -> Result<Self, TransportError> {
        Ok(Self {
            agent: build_agent(options, None)?,
            token: Zeroizing::new(token.trim().to_string()),
        })
    }

    fn authorization(&self) -> Result<HeaderValue, TransportError> {
        let mut value = HeaderValue::from_str(&bearer(&self.token)).map_err(|_| {
            TransportError::Request("access token is not a valid header value".into())
        })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl RequestSigner for TokenSigner {
    fn execute(&self, mut request: Request<()>) -> Result<Response<String>, TransportError> {
        request
            .headers_mut()
            .insert(AUTHORIZATION, self.authorization()?);
        send(&self.agent, request)
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner").finish_non_exhaustive()
    }
}

/// Header value for `token`, which may already carry the scheme.
fn bearer(token: &str) -> Zeroizing<String> {
    let has_scheme = token
        .get(..7)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("bearer "));

    if has_scheme {
        Zeroizing::new(format!("Bearer {}", token[7..].trim_start()))
    } else {
        Zeroizing::new(format!("Bearer {token}"))
    }
}

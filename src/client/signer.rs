//! The capability the client uses to put a request on the wire.

use std::fmt;

use thiserror::Error;
use ureq::http::{Request, Response};

/// Failure to get any response out of the transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection, DNS, timeout or I/O failure. The message is kept verbatim.
    #[error("{0}")]
    Network(String),

    #[error("TLS error: {0}")]
    Tls(String),

    /// Non-2xx response that carried no body to decode.
    #[error("server responded with status {0} and an empty body")]
    Status(u16),

    #[error("could not build request: {0}")]
    Request(String),
}

/// Attaches authentication to a request and sends it.
///
/// Implementations own the authentication strategy (bearer token, mutual TLS)
/// and the connection settings. They must return the raw response, including
/// non-2xx responses that have a body.
pub trait RequestSigner: fmt::Debug {
    fn execute(&self, request: Request<()>) -> Result<Response<String>, TransportError>;
}

impl<S: RequestSigner + ?Sized> RequestSigner for &S {
    fn execute(&self, request: Request<()>) -> Result<Response<String>, TransportError> {
        (**self).execute(request)
    }
}

impl<S: RequestSigner + ?Sized> RequestSigner for Box<S> {
    fn execute(&self, request: Request<()>) -> Result<Response<String>, TransportError> {
        (**self).execute(request)
    }
}

//! Client library and CLI for the CredHub credential manager.
//!
//! The retrieval core is [`client::CredHub`]: it sends one GET per call
//! through an injected [`client::RequestSigner`] and decodes the response
//! into typed credentials.

pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod credentials;
pub mod decode;
pub mod errors;

pub use client::{CredHub, RequestSigner, TransportError};
pub use errors::{CredHubError, Result};

//! Credential model: the server envelope and the typed value variants.
//!
//! This module provides:
//! - `Credential` envelope and `CredentialType` tag (`envelope`)
//! - Typed value shapes and the `CredentialValue` sum type (`values`)
//! - Search result rows (`listing`)

pub mod envelope;
pub mod listing;
pub mod values;

// Re-export the most commonly used items.
pub use envelope::{Credential, CredentialType};
pub use listing::{CredentialPath, FoundCredential};
pub use values::{
    Certificate, CredentialValue, Generic, Json, Password, Rsa, Ssh, TypedValue, User, Value,
};

//! Result rows of the search endpoints.

use serde::{Deserialize, Serialize};

/// A credential name matched by a search, with its latest version timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundCredential {
    pub name: String,
    pub version_created_at: String,
}

/// A path prefix under which credentials exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialPath {
    pub path: String,
}

//! Retrieval client: typed getters over the CredHub data API.
//!
//! Every getter builds one GET request, hands it to the injected
//! `RequestSigner`, and decodes the body. Nothing is retried and transport
//! errors come back exactly as the signer produced them.

pub mod signer;

pub use signer::{RequestSigner, TransportError};

use ureq::http::Request;
use url::Url;

use crate::credentials::{
    Certificate, Credential, CredentialPath, FoundCredential, Json, Password, Rsa, Ssh, TypedValue,
    User, Value,
};
use crate::decode;
use crate::errors::{CredHubError, Result};

/// Base path of the credential data endpoints.
const DATA_PATH: &str = "/api/v1/data";

/// Client for one CredHub server.
#[derive(Debug)]
pub struct CredHub<S> {
    /// Server URL without a trailing slash.
    base_url: String,
    signer: S,
}

impl<S: RequestSigner> CredHub<S> {
    /// Create a client for `base_url` that sends requests through `signer`.
    pub fn new(base_url: &str, signer: S) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| CredHubError::InvalidUrl(format!("{base_url}: {e}")))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CredHubError::InvalidUrl(format!(
                "{base_url}: scheme must be http or https"
            )));
        }

        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            signer,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ------------------------------------------------------------------
    // Untyped retrieval
    // ------------------------------------------------------------------

    /// Fetch the most recent version of a credential.
    pub fn get_latest_version(&self, name: &str) -> Result<Credential> {
        self.get_n_versions(name, 1)?
            .into_iter()
            .next()
            .ok_or(CredHubError::EmptyResult)
    }

    /// Fetch up to `versions` versions of a credential, newest first.
    ///
    /// Fewer versions than requested is a normal result; none at all is
    /// `CredHubError::EmptyResult`.
    pub fn get_n_versions(&self, name: &str, versions: u32) -> Result<Vec<Credential>> {
        if versions == 0 {
            return Err(CredHubError::InvalidArgument(
                "version count must be at least 1".into(),
            ));
        }

        let versions = versions.to_string();
        let url = self.data_url(&[("name", name), ("versions", &versions)])?;
        let body = self.send(url)?;
        decode::decode_envelopes(&body)
    }

    /// Fetch one credential version by its server-assigned id.
    pub fn get_by_id(&self, id: &str) -> Result<Credential> {
        let mut url = self.data_url(&[])?;
        url.path_segments_mut()
            .map_err(|()| CredHubError::InvalidUrl(self.base_url.clone()))?
            .push(id);
        let body = self.send(url)?;
        decode::decode_envelope(&body)
    }

    // ------------------------------------------------------------------
    // Typed retrieval
    // ------------------------------------------------------------------

    /// Fetch the latest version and decode it as `T`.
    pub fn get_latest<T: TypedValue>(&self, name: &str) -> Result<Credential<T>> {
        decode::decode_typed(self.get_latest_version(name)?)
    }

    pub fn get_password(&self, name: &str) -> Result<Credential<Password>> {
        self.get_latest(name)
    }

    pub fn get_certificate(&self, name: &str) -> Result<Credential<Certificate>> {
        self.get_latest(name)
    }

    pub fn get_user(&self, name: &str) -> Result<Credential<User>> {
        self.get_latest(name)
    }

    pub fn get_rsa(&self, name: &str) -> Result<Credential<Rsa>> {
        self.get_latest(name)
    }

    pub fn get_ssh(&self, name: &str) -> Result<Credential<Ssh>> {
        self.get_latest(name)
    }

    pub fn get_json(&self, name: &str) -> Result<Credential<Json>> {
        self.get_latest(name)
    }

    pub fn get_value(&self, name: &str) -> Result<Credential<Value>> {
        self.get_latest(name)
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    /// Credentials whose name contains `fragment`.
    pub fn find_by_partial_name(&self, fragment: &str) -> Result<Vec<FoundCredential>> {
        let url = self.data_url(&[("name-like", fragment)])?;
        decode::decode_found(&self.send(url)?)
    }

    /// Credentials stored under `path`.
    pub fn find_by_path(&self, path: &str) -> Result<Vec<FoundCredential>> {
        let url = self.data_url(&[("path", path)])?;
        decode::decode_found(&self.send(url)?)
    }

    /// Every path that holds at least one credential.
    pub fn get_all_paths(&self) -> Result<Vec<CredentialPath>> {
        let url = self.data_url(&[("paths", "true")])?;
        decode::decode_paths(&self.send(url)?)
    }

    // ------------------------------------------------------------------
    // Request plumbing
    // ------------------------------------------------------------------

    /// `{base}/api/v1/data` with form-encoded query pairs.
    fn data_url(&self, query: &[(&str, &str)]) -> Result<Url> {
        let raw = format!("{}{DATA_PATH}", self.base_url);
        let mut url =
            Url::parse(&raw).map_err(|e| CredHubError::InvalidUrl(format!("{raw}: {e}")))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Send a GET and return the body.
    ///
    /// A non-2xx answer whose body is a server error document becomes
    /// `CredHubError::Server`; anything else goes to the decoder.
    fn send(&self, url: Url) -> Result<String> {
        let request = Request::get(url.as_str())
            .body(())
            .map_err(|e| CredHubError::InvalidUrl(format!("{url}: {e}")))?;

        let response = self.signer.execute(request)?;
        let status = response.status();
        let body = response.into_body();

        if !status.is_success() {
            if let Some(message) = decode::decode_error_message(&body) {
                return Err(CredHubError::Server {
                    status: status.as_u16(),
                    message,
                });
            }
        }

        Ok(body)
    }
}

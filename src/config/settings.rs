use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::auth::{MutualTlsSigner, TokenSigner, TransportOptions};
use crate::client::{CredHub, RequestSigner};
use crate::errors::{CredHubError, Result};

/// Signer chosen from the settings at runtime.
pub type BoxedSigner = Box<dyn RequestSigner + Send + Sync>;

/// Client configuration, loaded from `~/.credhub/config.toml`.
///
/// Every field has a default so the CLI can run from flags and environment
/// variables alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// CredHub server URL (e.g. "https://credhub.example.com:8844").
    #[serde(default)]
    pub server: Option<String>,

    /// OAuth access token sent as a bearer token.
    #[serde(default)]
    pub token: Option<String>,

    /// PEM files with extra CA certificates to trust.
    #[serde(default)]
    pub ca_certs: Vec<PathBuf>,

    /// PEM client certificate for mutual TLS.
    #[serde(default)]
    pub client_cert: Option<PathBuf>,

    /// PEM private key matching `client_cert`.
    #[serde(default)]
    pub client_key: Option<PathBuf>,

    /// Skip verification of the server certificate.
    #[serde(default)]
    pub skip_tls_validation: bool,

    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_timeout_secs() -> u64 {
    30
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: None,
            token: None,
            ca_certs: Vec::new(),
            client_cert: None,
            client_key: None,
            skip_tls_validation: false,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Settings {
    /// Name of the config file inside the config directory.
    const FILE_NAME: &'static str = "config.toml";

    /// `$HOME/.credhub`, if a home directory can be found.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".credhub"))
    }

    /// Load settings from `<config_dir>/config.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            CredHubError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Read the CA files and assemble the transport options.
    pub fn transport_options(&self) -> Result<TransportOptions> {
        let ca_certs = self
            .ca_certs
            .iter()
            .map(|path| read_pem(path, "CA certificate"))
            .collect::<Result<Vec<_>>>()?;

        Ok(TransportOptions {
            ca_certs,
            skip_tls_validation: self.skip_tls_validation,
            timeout: (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs)),
        })
    }

    /// Pick the authentication strategy.
    ///
    /// A client certificate and key select mutual TLS; otherwise a token is
    /// required.
    pub fn build_signer(&self) -> Result<BoxedSigner> {
        let options = self.transport_options()?;

        match (&self.client_cert, &self.client_key) {
            (Some(cert), Some(key)) => {
                tracing::debug!(cert = %cert.display(), "using mutual TLS authentication");
                let cert = read_pem(cert, "client certificate")?;
                let key = read_pem(key, "client key")?;
                let signer: BoxedSigner = Box::new(MutualTlsSigner::new(&cert, &key, &options)?);
                Ok(signer)
            }
            (Some(_), None) | (None, Some(_)) => Err(CredHubError::ConfigError(
                "client certificate and client key must be given together".into(),
            )),
            (None, None) => match self.token.as_deref().map(str::trim) {
                Some(token) if !token.is_empty() => {
                    tracing::debug!("using bearer token authentication");
                    let signer: BoxedSigner = Box::new(TokenSigner::new(token, &options)?);
                    Ok(signer)
                }
                _ => Err(CredHubError::ConfigError(
                    "not authenticated; set CREDHUB_TOKEN or a client certificate and key".into(),
                )),
            },
        }
    }

    /// Build a client for the configured server.
    pub fn build_client(&self) -> Result<CredHub<BoxedSigner>> {
        let server = self.server.as_deref().ok_or_else(|| {
            CredHubError::ConfigError("no server configured; set CREDHUB_SERVER or --server".into())
        })?;
        CredHub::new(server, self.build_signer()?)
    }
}

fn read_pem(path: &Path, what: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        CredHubError::ConfigError(format!("cannot read {what} {}: {e}", path.display()))
    })
}

// ── Tests ────────────────────────────────────────────────────────────

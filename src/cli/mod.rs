//! Command-line interface: argument parsing, settings overlay and the `get`/`find` commands.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use clap_complete::Shell;

use crate::client::CredHub;
use crate::config::{BoxedSigner, Settings};
use crate::errors::{CredHubError, Result};

/// CredHub CLI: read credentials from a CredHub server.
#[derive(Parser)]
#[command(
    name = "credhub",
    about = "Command-line client for the CredHub credential manager",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// CredHub server URL
    #[arg(long, env = "CREDHUB_SERVER", global = true)]
    pub server: Option<String>,

    /// OAuth access token
    #[arg(long, env = "CREDHUB_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// PEM file with a CA certificate to trust (repeatable)
    #[arg(
        long = "ca-cert",
        env = "CREDHUB_CA_CERT",
        value_delimiter = ',',
        global = true
    )]
    pub ca_certs: Vec<PathBuf>,

    /// PEM client certificate for mutual TLS
    #[arg(long, env = "CREDHUB_CLIENT_CERT", global = true)]
    pub client_cert: Option<PathBuf>,

    /// PEM private key for the client certificate
    #[arg(long, env = "CREDHUB_CLIENT_KEY", global = true)]
    pub client_key: Option<PathBuf>,

    /// Do not verify the server's TLS certificate
    #[arg(long, global = true)]
    pub skip_tls_validation: bool,

    /// Directory holding config.toml (default: ~/.credhub)
    #[arg(long, env = "CREDHUB_CONFIG_DIR", global = true)]
    pub config_dir: Option<PathBuf>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Get a credential by name or id
    Get(GetArgs),

    /// Find credentials by partial name or path
    Find(FindArgs),

    /// Show version and target server
    Version,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments of `credhub get`.
#[derive(clap::Args)]
#[command(group(ArgGroup::new("target").required(true).args(["name", "id"])))]
pub struct GetArgs {
    /// Name of the credential (e.g. /deploy/db-password)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Server-assigned id of one credential version
    #[arg(long)]
    pub id: Option<String>,

    /// Number of versions to fetch, newest first
    #[arg(long, conflicts_with = "id")]
    pub versions: Option<u32>,

    /// Print only this field of the credential value
    #[arg(short, long)]
    pub key: Option<String>,

    /// Print the response as JSON
    #[arg(short = 'j', long)]
    pub output_json: bool,
}

/// Arguments of `credhub find`.
#[derive(clap::Args)]
#[command(group(
    ArgGroup::new("query")
        .required(true)
        .args(["name_like", "path", "all_paths"])
))]
pub struct FindArgs {
    /// Find credentials whose name contains this text
    #[arg(short = 'n', long)]
    pub name_like: Option<String>,

    /// Find credentials stored under this path
    #[arg(short, long)]
    pub path: Option<String>,

    /// List every path that holds credentials
    #[arg(long)]
    pub all_paths: bool,

    /// Print the response as JSON
    #[arg(short = 'j', long)]
    pub output_json: bool,
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load `config.toml` and apply the command-line/environment overrides.
///
/// Precedence: flag or environment variable, then config file, then default.
pub fn settings(cli: &Cli) -> Result<Settings> {
    let mut settings = match cli.config_dir.clone().or_else(Settings::default_dir) {
        Some(dir) => Settings::load(&dir)?,
        None => Settings::default(),
    };

    if let Some(server) = &cli.server {
        settings.server = Some(server.clone());
    }
    if let Some(token) = &cli.token {
        settings.token = Some(token.clone());
    }
    if !cli.ca_certs.is_empty() {
        settings.ca_certs = cli.ca_certs.clone();
    }
    if let Some(cert) = &cli.client_cert {
        settings.client_cert = Some(cert.clone());
    }
    if let Some(key) = &cli.client_key {
        settings.client_key = Some(key.clone());
    }
    if cli.skip_tls_validation {
        settings.skip_tls_validation = true;
    }

    Ok(settings)
}

/// Build a client from the effective settings.
pub fn build_client(cli: &Cli) -> Result<CredHub<BoxedSigner>> {
    let settings = settings(cli)?;
    if settings.skip_tls_validation {
        output::warning("TLS validation is disabled for this request.");
    }
    settings.build_client()
}

/// Validate that a credential name is absolute.
///
/// CredHub names always start with `/`; a relative name is almost always a
/// typo, so it is rejected before any request is sent.
pub fn validate_credential_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(CredHubError::InvalidArgument(
            "credential name cannot be empty".into(),
        ));
    }

    if !name.starts_with('/') {
        return Err(CredHubError::InvalidArgument(format!(
            "credential name '{name}' must start with '/'"
        )));
    }

    if name.chars().any(char::is_control) {
        return Err(CredHubError::InvalidArgument(format!(
            "credential name '{}' contains control characters",
            name.escape_debug()
        )));
    }

    Ok(())
}

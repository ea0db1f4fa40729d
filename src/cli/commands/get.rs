//! `credhub get`: fetch a credential by name or id and print it.

use serde_json::json;

use crate::cli::output;
use crate::cli::{build_client, validate_credential_name, Cli, GetArgs};
use crate::credentials::Credential;
use crate::errors::{CredHubError, Result};

/// Execute the `get` command.
pub fn execute(cli: &Cli, args: &GetArgs) -> Result<()> {
    if let Some(name) = &args.name {
        validate_credential_name(name)?;
    }

    let client = build_client(cli)?;

    let credentials = match (&args.id, &args.name, args.versions) {
        (Some(id), _, _) => vec![client.get_by_id(id)?],
        (None, Some(name), Some(versions)) => client.get_n_versions(name, versions)?,
        (None, Some(name), None) => vec![client.get_latest_version(name)?],
        (None, None, _) => {
            return Err(CredHubError::InvalidArgument(
                "either --name or --id is required".into(),
            ))
        }
    };

    // Refuse to print anything whose value does not match its type tag.
    for credential in &credentials {
        credential.decode_value()?;
    }
    tracing::debug!(count = credentials.len(), "fetched credential versions");

    if let Some(key) = &args.key {
        for credential in &credentials {
            println!("{}", output::scalar_or_json(select_key(credential, key)?));
        }
        return Ok(());
    }

    if args.output_json {
        let document = if args.versions.is_some() {
            json!({ "versions": credentials })
        } else {
            serde_json::to_value(&credentials[0])
                .map_err(|e| CredHubError::CommandFailed(format!("cannot render JSON: {e}")))?
        };
        let rendered = serde_json::to_string_pretty(&document)
            .map_err(|e| CredHubError::CommandFailed(format!("cannot render JSON: {e}")))?;
        println!("{rendered}");
        return Ok(());
    }

    for (i, credential) in credentials.iter().enumerate() {
        if i > 0 {
            println!();
        }
        output::print_credential(credential);
    }

    Ok(())
}

/// The field `key` of a credential's value.
fn select_key<'a>(credential: &'a Credential, key: &str) -> Result<&'a serde_json::Value> {
    credential.value.get(key).ok_or_else(|| {
        CredHubError::CommandFailed(format!(
            "credential '{}' of type {} has no key '{key}'",
            credential.name, credential.credential_type
        ))
    })
}

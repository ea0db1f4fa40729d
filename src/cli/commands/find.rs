//! `credhub find`: search credentials by partial name or path.

use crate::cli::output;
use crate::cli::{build_client, Cli, FindArgs};
use crate::errors::{CredHubError, Result};

/// Execute the `find` command.
pub fn execute(cli: &Cli, args: &FindArgs) -> Result<()> {
    let client = build_client(cli)?;

    if args.all_paths {
        let paths = client.get_all_paths()?;
        if args.output_json {
            return print_json(&serde_json::json!({ "paths": paths }));
        }
        if paths.is_empty() {
            output::info("No paths exist on this server.");
            return Ok(());
        }
        output::print_paths_table(&paths);
        return Ok(());
    }

    let found = match (&args.name_like, &args.path) {
        (Some(fragment), _) => client.find_by_partial_name(fragment)?,
        (None, Some(path)) => client.find_by_path(path)?,
        (None, None) => {
            return Err(CredHubError::InvalidArgument(
                "one of --name-like, --path or --all-paths is required".into(),
            ))
        }
    };

    if args.output_json {
        return print_json(&serde_json::json!({ "credentials": found }));
    }

    if found.is_empty() {
        output::info("No credentials exist which match the provided parameters.");
        output::tip("Run `credhub find --all-paths` to see where credentials are stored.");
        return Ok(());
    }

    output::print_found_table(&found);
    Ok(())
}

fn print_json(document: &serde_json::Value) -> Result<()> {
    let rendered = serde_json::to_string_pretty(document)
        .map_err(|e| CredHubError::CommandFailed(format!("cannot render JSON: {e}")))?;
    println!("{rendered}");
    Ok(())
}

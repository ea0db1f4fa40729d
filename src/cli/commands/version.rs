//! `credhub version`: display the CLI version and the configured server.

use console::style;

use crate::cli::{settings, Cli};
use crate::errors::Result;

/// Execute the `version` command.
pub fn execute(cli: &Cli) -> Result<()> {
    println!("CLI Version: {}", env!("CARGO_PKG_VERSION"));

    match settings(cli)?.server {
        Some(server) => println!("Server: {}", style(server).cyan()),
        None => println!("Server: {}", style("not set").dim()),
    }

    Ok(())
}

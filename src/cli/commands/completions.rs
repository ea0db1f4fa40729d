//! `credhub completions`: write a shell completion script to stdout.
//!
//! Usage:
//!   credhub completions bash > /etc/bash_completion.d/credhub
//!   credhub completions zsh > "${fpath[1]}/_credhub"

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::Result;

/// Execute the `completions` command.
pub fn execute(shell: Shell) -> Result<()> {
    io::stdout().write_all(&script(shell))?;
    Ok(())
}

/// The completion script for `shell`.
fn script(shell: Shell) -> Vec<u8> {
    let mut cmd = Cli::command();
    let mut out = Vec::new();
    generate(shell, &mut cmd, "credhub", &mut out);
    out
}

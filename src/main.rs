use clap::Parser;
use credhub::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    // Diagnostics go to stderr; stdout stays clean for credential output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "credhub=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Get(ref args) => credhub::cli::commands::get::execute(&cli, args),
        Commands::Find(ref args) => credhub::cli::commands::find::execute(&cli, args),
        Commands::Version => credhub::cli::commands::version::execute(&cli),
        Commands::Completions { shell } => credhub::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        credhub::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

// src/bin/methodset.rs

use clap::Parser;
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use methodset::ModuleLoader;
use methodset::cli::{Cli, Commands};
use methodset::commands::{self, UsageError};

fn main() -> ExitCode {
    // Initialize tracing if METHODSET_LOG is set
    if let Ok(filter) = EnvFilter::try_from_env("METHODSET_LOG") {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();
    let loader = ModuleLoader::new(cli.source.loader_config());
    tracing::debug!(?loader, "starting");

    let output = match &cli.command {
        Commands::Interface { out, targets } => commands::interface::execute(&loader, out, targets),
        Commands::Mock { pkg, type_name } => commands::mock::execute(&loader, pkg, type_name),
        Commands::Stub {
            pkg,
            implement,
            type_name,
            name,
        } => commands::stub::execute(&loader, pkg, implement, type_name, name),
    };

    match output {
        Ok(text) => {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = stdout.write_all(text.as_bytes()).and_then(|()| stdout.flush()) {
                eprintln!("error: could not write output: {e}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) if e.downcast_ref::<UsageError>().is_some() => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

//! CLI entry point - the composition root.
//!
//! This is the ONLY place where infrastructure is wired together via bootstrap.
//! Command dispatch routes to handlers which delegate to core services.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use techsphere_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

#[tokio::main]
async fn main() {
    // Load environment variables first so `RUST_LOG` and the data dir apply
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        std::process::exit(CliError::exit_code_for(&err));
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    // Paths needs no database
    if matches!(command, Commands::Paths) {
        return handlers::paths::execute();
    }

    let mut config = CliConfig::with_defaults();
    if cli.no_progress {
        config.show_progress = false;
    }
    let ctx = bootstrap(config).await?;

    match command {
        Commands::Cart { command } => handlers::cart::execute(&ctx, command).await,
        Commands::Checkout => handlers::checkout::execute(&ctx),
        Commands::Product { command } => handlers::product::execute(&ctx, command).await,
        Commands::Banner { command } => handlers::banner::execute(&ctx, command).await,
        Commands::Config { command } => handlers::config::execute(&ctx, command).await,
        Commands::Paths => handlers::paths::execute(),
    }
}

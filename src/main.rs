//! TailorNova - custom clothing design studio
//!
//! Command-line front end for browsing the catalog, quoting prices, running
//! scripted design sessions and verifying artist uploads.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tailornova::cli::{
    CatalogArgs, CliError, ConfigArgs, ExitCode, QuoteArgs, SessionArgs, VerifyArgs,
};
use tailornova::constants::APP_BINARY_NAME;

/// TailorNova - custom clothing design studio
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List catalog reference data
    Catalog(CatalogArgs),
    /// Price a garment, fabric and pattern combination
    Quote(QuoteArgs),
    /// Run design commands through a fresh studio session
    Session(SessionArgs),
    /// Check a design image for duplicates and optionally submit it
    Verify(VerifyArgs),
    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<(), CliError> = match &cli.command {
        Command::Catalog(args) => args.execute(),
        Command::Quote(args) => args.execute(),
        Command::Session(args) => args.execute(),
        Command::Verify(args) => args.execute(),
        Command::Config(args) => args.execute(),
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(err.code.code());
    }

    std::process::exit(ExitCode::Success.code());
}

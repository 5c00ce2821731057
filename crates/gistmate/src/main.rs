//! gistmate - create, fetch, and update GitHub gists from the command line.
//!
//! Remembers which local file belongs to which gist in `~/.gists`.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gistmate_cmd::factory::Factory;
use gistmate_core::cmdutil::{NoAuthError, is_user_cancellation};
use gistmate_core::ios_eprintln;

/// Process exit codes.
mod exit_codes {
    pub const OK: i32 = 0;
    pub const ERROR: i32 = 1;
    pub const CANCEL: i32 = 2;
    pub const AUTH: i32 = 4;
}

/// Create, fetch, and update GitHub gists.
#[derive(Debug, Parser)]
#[command(
    name = "gistmate",
    version,
    about = "Create, fetch, and update GitHub gists",
    long_about = "Create, fetch, and update GitHub gists.\n\n\
                  gistmate remembers which local file belongs to which gist, \
                  so `update` and `url` only need a filename."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(flatten)]
    Gist(gistmate_cmd::gist::GistCommand),
    /// Manage configuration for gistmate.
    #[command(subcommand)]
    Config(gistmate_cmd::config::ConfigCommand),
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("GISTMATE_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let factory = Factory::new(env!("CARGO_PKG_VERSION").to_string());

    let exit_code = if let Some(cmd) = cli.command {
        match run_command(cmd, &factory).await {
            Ok(()) => exit_codes::OK,
            Err(e) => {
                let cs = factory.io.color_scheme();
                if is_user_cancellation(&e) {
                    exit_codes::CANCEL
                } else if e.downcast_ref::<NoAuthError>().is_some() {
                    ios_eprintln!(factory.io, "{}", cs.error(&format!("{e:#}")));
                    exit_codes::AUTH
                } else {
                    ios_eprintln!(factory.io, "{}", cs.error(&format!("{e:#}")));
                    exit_codes::ERROR
                }
            }
        }
    } else {
        use clap::CommandFactory;
        Cli::command().print_help().ok();
        println!();
        exit_codes::OK
    };

    std::process::exit(exit_code);
}

async fn run_command(cmd: Commands, factory: &Factory) -> anyhow::Result<()> {
    match cmd {
        Commands::Gist(sub) => sub.run(factory).await,
        Commands::Config(sub) => sub.run(factory),
    }
}

//! Terminal front-end for grid targeting.
//!
//! Run with: `tactics <command> --scene keep.ron`
mod commands;
mod config;
mod prompt;

use anyhow::Result;
use clap::Parser;
use commands::{Adjacent, Pick, Query};
use config::CliConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Grid targeting against a scene snapshot
#[derive(Parser)]
#[command(name = "tactics")]
#[command(about = "Grid targeting against a scene snapshot", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// List the creatures inside an area
    Query(Query),

    /// Pick targets interactively from stdin
    Pick(Pick),

    /// Check whether two creatures are adjacent
    Adjacent(Adjacent),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();

    let cli = Cli::parse();
    let config = CliConfig::from_env();

    match cli.command {
        Command::Query(cmd) => cmd.execute(&config),
        Command::Pick(cmd) => cmd.execute(&config).await,
        Command::Adjacent(cmd) => cmd.execute(&config),
    }
}

/// Logs go to stderr so stdout stays clean for results.
fn setup_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_line_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn query_needs_an_origin() {
        assert!(Cli::try_parse_from(["tactics", "query", "--radius", "2"]).is_err());
        assert!(Cli::try_parse_from(["tactics", "query", "--at", "150,150"]).is_ok());
        assert!(
            Cli::try_parse_from(["tactics", "query", "--at", "1,1", "--caster", "Grund"]).is_err()
        );
    }

    #[test]
    fn filters_parse_case_insensitively() {
        let cli = Cli::try_parse_from(["tactics", "pick", "--caster", "Grund", "--filter", "Enemies"])
            .unwrap();
        let Command::Pick(pick) = cli.command else {
            panic!("expected pick");
        };
        assert_eq!(pick.filter, tactics_core::FactionFilter::Enemies);
        assert_eq!(pick.range, 5);
    }
}

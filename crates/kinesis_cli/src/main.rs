//! Kinesis CLI
//!
//! Drives the portfolio page without a browser:
//! - `kinesis simulate` scrolls a headless page top to bottom and reports
//!   every reveal, counter and particle
//! - `kinesis theme` reads or changes the persisted light/dark preference

mod simulate;
mod theme;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kinesis_app::SiteConfig;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Headless tooling for the Kinesis portfolio page
#[derive(Parser, Debug)]
#[command(name = "kinesis")]
#[command(about = "Headless scroll-reveal simulation and theme preferences")]
#[command(version)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mount the page and scroll it from top to bottom
    Simulate(simulate::SimulateArgs),

    /// Show or change the persisted theme preference
    Theme(theme::ThemeArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load a site config, or the defaults when none is given
fn load_config(path: Option<&Path>) -> Result<SiteConfig> {
    match path {
        Some(path) => SiteConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(SiteConfig::default()),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Simulate(args) => simulate::run(args).await,
        Command::Theme(args) => theme::run(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_simulate_flags() {
        let cli = Cli::try_parse_from([
            "kinesis",
            "simulate",
            "--seed",
            "7",
            "--speed",
            "800",
            "--category",
            "Treatment",
            "--json",
        ])
        .unwrap();
        let Command::Simulate(args) = cli.command else {
            panic!("expected simulate");
        };
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.speed, 800.0);
        assert_eq!(args.category.as_deref(), Some("Treatment"));
        assert!(args.json);
        assert!(!args.realtime);
    }

    #[test]
    fn parses_theme_subcommands() {
        let cli = Cli::try_parse_from(["kinesis", "theme", "set", "dark", "--store", "p.json"]).unwrap();
        let Command::Theme(args) = cli.command else {
            panic!("expected theme");
        };
        assert!(matches!(args.action, theme::ThemeAction::Set { .. }));
        assert_eq!(args.store.as_deref(), Some(std::path::Path::new("p.json")));
    }
}

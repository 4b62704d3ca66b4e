//! hlbars CLI - collect Hyperliquid trades into one-second OHLCV bars.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use hlbars_lib::ReportOptions;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "hlbars")]
#[command(about = "Collect Hyperliquid trades into one-second OHLCV bars", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (warnings and errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Configuration file
    #[arg(short, long, global = true, default_value = hlbars_lib::prelude::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll recent trades and persist each new one-second bar (default)
    Run(RunArgs),

    /// Print the stored bars
    Dump {
        /// Database file. Defaults to `db_path` from the configuration.
        #[arg(short, long)]
        db_path: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: Format,

        /// Only print the first N bars
        #[arg(long)]
        head: Option<usize>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Omit the CSV header row
        #[arg(long)]
        no_header: bool,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

/// Overrides for the collector configuration.
#[derive(Args, Debug, Default)]
struct RunArgs {
    /// Instrument symbol (e.g., BTC, ETH)
    #[arg(long)]
    coin: Option<String>,

    /// Info endpoint URL
    #[arg(long)]
    base_url: Option<String>,

    /// Database file
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Poll interval in milliseconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    interval_ms: Option<u64>,
}

/// Default log directive for a verbosity setting.
const fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "warn",
        (false, 0) => "info,hyper=warn,reqwest=warn,rustls=warn",
        (false, 1) => "debug,hyper=info,reqwest=info,rustls=info",
        (false, _) => "trace",
    }
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over flags.
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command.unwrap_or_else(|| Commands::Run(RunArgs::default())) {
        Commands::Run(args) => commands::run::run(&cli.config, args).await,
        Commands::Dump {
            db_path,
            format,
            head,
            output,
            no_header,
            pretty,
        } => {
            let options = ReportOptions {
                header: !no_header,
                pretty,
            };
            commands::dump::dump(
                &cli.config,
                db_path,
                format,
                head,
                output.as_deref(),
                options,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_run() {
        let cli = Cli::try_parse_from(["hlbars"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from("config.yaml"));
    }

    #[test]
    fn test_run_overrides() {
        let cli = Cli::try_parse_from([
            "hlbars",
            "-v",
            "run",
            "--coin",
            "ETH",
            "--interval-ms",
            "500",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        let Some(Commands::Run(args)) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.coin.as_deref(), Some("ETH"));
        assert_eq!(args.interval_ms, Some(500));
        assert!(args.base_url.is_none());
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(Cli::try_parse_from(["hlbars", "run", "--interval-ms", "0"]).is_err());
    }

    #[test]
    fn test_dump_args() {
        let cli = Cli::try_parse_from([
            "hlbars", "dump", "--format", "ndjson", "--head", "10", "--config", "alt.yaml",
        ])
        .unwrap();
        assert_eq!(cli.config, PathBuf::from("alt.yaml"));
        let Some(Commands::Dump {
            format,
            head,
            no_header,
            pretty,
            ..
        }) = cli.command
        else {
            panic!("expected dump");
        };
        assert!(matches!(format, Format::Ndjson));
        assert_eq!(head, Some(10));
        assert!(!no_header);
        assert!(!pretty);
    }

    #[test]
    fn test_dump_layout_flags() {
        let cli = Cli::try_parse_from(["hlbars", "dump", "--no-header", "--pretty"]).unwrap();
        let Some(Commands::Dump {
            no_header, pretty, ..
        }) = cli.command
        else {
            panic!("expected dump");
        };
        assert!(no_header);
        assert!(pretty);
    }

    #[test]
    fn test_quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["hlbars", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(0, true), "warn");
        assert!(default_directive(0, false).starts_with("info"));
        assert!(default_directive(1, false).starts_with("debug"));
        assert_eq!(default_directive(2, false), "trace");
    }
}

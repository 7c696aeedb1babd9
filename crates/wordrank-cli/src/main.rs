use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wordrank_core::RankConfig;

mod commands;

/// wordrank — rank the most frequent words in a text.
#[derive(Parser, Debug)]
#[command(name = "wordrank", version, about)]
struct Cli {
    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// JSON config file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the most frequent words
    Top {
        /// Input file (reads stdin when omitted)
        path: Option<PathBuf>,

        /// How many words to print
        #[arg(
            short = 'n',
            long = "limit",
            default_value_t = 10,
            allow_negative_numbers = true
        )]
        n: i64,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Plain)]
        format: Format,

        /// Include each word's count
        #[arg(long)]
        counts: bool,
    },
    /// Print token and vocabulary statistics
    Stats {
        /// Input file (reads stdin when omitted)
        path: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Plain,
    Jsonl,
}

impl Cli {
    fn is_quiet(&self) -> bool {
        self.quiet
    }

    fn rank_config(&self) -> Result<RankConfig> {
        match &self.config {
            Some(path) => Ok(RankConfig::load(path)?),
            None => Ok(RankConfig::default()),
        }
    }

    fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn init_logging(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    match &cli.command {
        Command::Top {
            path,
            n,
            format,
            counts,
        } => commands::top::run(&cli, path.as_deref(), *n, *format, *counts),
        Command::Stats { path } => commands::stats::run(&cli, path.as_deref()),
    }
}

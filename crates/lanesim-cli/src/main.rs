use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

/// Top-level CLI argument parser for the `lanesim` command
#[derive(Parser)]
#[command(
    name = "lanesim",
    about = "lanesim: scalar vs lane-masked vector kernels on a simulated vector unit",
    version
)]
struct Cli {
    /// Tracing filter (e.g. `info`, `lanesim=debug`); `RUST_LOG` takes precedence
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the `lanesim` CLI
#[derive(Subcommand)]
enum Commands {
    /// Run scalar and vector kernels over one workload and verify the results
    Run {
        /// Workload size N (default 16)
        #[arg(short, long, allow_negative_numbers = true)]
        size: Option<i64>,
        /// Print the vector unit execution log
        #[arg(short, long)]
        log: bool,
        /// Kernel to run: abs, clamped-exp, array-sum, or all (default abs)
        #[arg(short, long)]
        kernel: Option<String>,
        /// Seed for the workload generator (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Output format: text (default) or json
        #[arg(long)]
        format: Option<String>,
        /// YAML config file; flags override its values
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List available kernels and vector unit parameters
    Kernels,
}

/// Install the fmt subscriber on stderr so reports on stdout stay clean
fn setup_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Dispatch a parsed CLI subcommand to its handler
fn run_command(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Run {
            size,
            log,
            kernel,
            seed,
            format,
            config,
        } => commands::run::run(&commands::run::RunArgs {
            config: config.as_deref(),
            size,
            kernel: kernel.as_deref(),
            seed,
            print_log: log,
            format: format.as_deref(),
        }),
        Commands::Kernels => commands::kernels::run(),
    }
}

/// Entry point: parse CLI arguments and run the selected subcommand
fn main() {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    if let Err(e) = run_command(cli.command) {
        tracing::error!("{e}");
        eprintln!("error: {e}");
        process::exit(1);
    }
}

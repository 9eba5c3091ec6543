use std::path::Path;

use lanesim::bench::run_suite;
use lanesim::config::{BenchConfig, OutputFormat};
use lanesim::kernels::KernelKind;
use lanesim::report::{SuiteReport, format_json, format_text};

/// Command-line overrides for a run. `None` keeps the config/default value.
#[derive(Debug, Default)]
pub struct RunArgs<'a> {
    pub config: Option<&'a Path>,
    pub size: Option<i64>,
    pub kernel: Option<&'a str>,
    pub seed: Option<u64>,
    pub print_log: bool,
    pub format: Option<&'a str>,
}

/// Merge the config file (if any) with command-line overrides.
pub fn resolve_config(args: &RunArgs<'_>) -> Result<BenchConfig, Box<dyn std::error::Error>> {
    let mut config = match args.config {
        Some(path) => BenchConfig::load(path)?,
        None => BenchConfig::default(),
    };
    if let Some(size) = args.size {
        config.size = size;
    }
    if let Some(kernel) = args.kernel {
        config.kernels = KernelKind::parse_list(kernel)?;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.print_log {
        config.print_log = true;
    }
    if let Some(format) = args.format {
        config.format = format.parse()?;
    }
    Ok(config)
}

pub fn run(args: &RunArgs<'_>) -> Result<(), Box<dyn std::error::Error>> {
    let config = resolve_config(args)?;
    let suite = run_suite(&config)?;
    let report = SuiteReport::from(&suite);

    match config.format {
        OutputFormat::Json => println!("{}", format_json(&report)?),
        OutputFormat::Text => print!("{}", format_text(&report)),
    }

    Ok(())
}

//! Median Filter - Command Line Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use medfilt::EdgePolicy;
use medfilt_cli::{init_logging, run, FilterConfig, OutputFormat};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{debug, info};

/// Sliding-window median filter for numeric text tables
#[derive(Debug, Parser)]
#[command(name = "medfilt", version)]
struct Cli {
    /// Input file; reads stdin when omitted or "-"
    input: Option<PathBuf>,

    /// Configuration file (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Window length in samples
    #[arg(short = 'n', long)]
    window: Option<usize>,

    /// Edge policy: zeropad or truncate
    #[arg(short, long)]
    policy: Option<EdgePolicy>,

    /// Axis for 2-D input: auto or a 0-based index
    #[arg(short, long)]
    axis: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Command line flags take precedence over file and environment
    fn apply(&self, config: &mut FilterConfig) {
        if let Some(window) = self.window {
            config.window = window;
        }
        if let Some(policy) = self.policy {
            config.policy = policy;
        }
        if let Some(axis) = &self.axis {
            config.axis = axis.clone();
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if self.verbose {
            config.log_level = "debug".to_string();
        }
    }

    fn read_input(&self) -> Result<String> {
        let mut text = String::new();
        match &self.input {
            Some(path) if path.as_os_str() != "-" => {
                text = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
            }
            _ => {
                io::stdin()
                    .read_to_string(&mut text)
                    .context("failed to read stdin")?;
            }
        }
        Ok(text)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config =
        FilterConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply(&mut config);
    init_logging(&config.log_level)?;

    info!("=== medfilt v{} ===", env!("CARGO_PKG_VERSION"));
    debug!("Configuration: {:?}", config);

    let text = cli.read_input()?;
    let output = run(&config, &text)?;

    io::stdout()
        .lock()
        .write_all(output.as_bytes())
        .context("failed to write output")?;

    Ok(())
}

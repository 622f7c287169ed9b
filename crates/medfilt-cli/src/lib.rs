//! Median Filter CLI
//!
//! Reads a whitespace/comma separated numeric table, median-filters it and
//! writes the result. A single row or column filtered along its long axis is
//! treated as one 1-D signal; anything else is filtered lane by lane along
//! the configured axis.

pub mod config;
pub mod input;

use anyhow::{Context, Result};
use medfilt::{filter, filter_axis, FilterAxis};
use ndarray::Array2;
use std::str::FromStr;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

pub use config::{FilterConfig, OutputFormat};

/// Initialize logging to stderr, keeping stdout for data
pub fn init_logging(level: &str) -> Result<()> {
    let level = Level::from_str(level).with_context(|| format!("invalid log level '{level}'"))?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")
}

/// Filter the table in `text` and render the output
pub fn run(config: &FilterConfig, text: &str) -> Result<String> {
    let table = input::parse_table(text).context("failed to parse input")?;
    if table.is_empty() {
        warn!("Input contains no samples");
        return Ok(String::new());
    }

    let (rows, cols) = table.dim();
    info!(
        "Filtering {}x{} table: window={}, policy={}",
        rows, cols, config.window, config.policy
    );

    let axis = FilterAxis::from_str(&config.axis)?;
    let along_signal = (rows == 1 || cols == 1)
        && match axis {
            FilterAxis::Auto => true,
            FilterAxis::Index(index) => [rows, cols].get(index) == Some(&table.len()),
        };

    let filtered = if along_signal {
        debug!("Treating {}x{} table as one signal", rows, cols);
        let signal: Vec<f64> = table.iter().copied().collect();
        let medians = filter(&signal, config.window, config.policy)?;
        Array2::from_shape_vec((rows, cols), medians)?
    } else {
        filter_axis(table.view(), config.window, config.policy, axis)?
    };

    Ok(input::render(&filtered, config.format)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use medfilt::EdgePolicy;

    fn config(window: usize, policy: EdgePolicy) -> FilterConfig {
        FilterConfig {
            window,
            policy,
            ..Default::default()
        }
    }

    #[test]
    fn test_column_signal() {
        let out = run(&config(3, EdgePolicy::Truncate), "5\n1\n9\n2\n8\n").unwrap();
        assert_eq!(out, "3\n5\n2\n8\n5\n");
    }

    #[test]
    fn test_row_signal() {
        let out = run(&config(3, EdgePolicy::ZeroPad), "1 2 3 4 5 6 7 8 9 10").unwrap();
        assert_eq!(out, "1 2 3 4 5 6 7 8 9 9\n");
    }

    #[test]
    fn test_single_sample() {
        let out = run(&config(5, EdgePolicy::ZeroPad), "42\n").unwrap();
        assert_eq!(out, "42\n");
    }

    #[test]
    fn test_table_along_rows() {
        let cfg = FilterConfig {
            axis: "1".to_string(),
            ..config(3, EdgePolicy::Truncate)
        };
        let out = run(&cfg, "1 9 2\n8 3 7\n").unwrap();
        assert_eq!(out, "5 2 5.5\n5.5 7 5\n");
    }

    #[test]
    fn test_json_output() {
        let cfg = FilterConfig {
            format: OutputFormat::Json,
            ..config(2, EdgePolicy::Truncate)
        };
        let out = run(&cfg, "1, 2, 3, 4").unwrap();
        assert_eq!(out, "[1.0,1.5,2.5,3.5]\n");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(run(&FilterConfig::default(), "").unwrap(), "");
    }

    #[test]
    fn test_invalid_window() {
        let err = run(&config(0, EdgePolicy::ZeroPad), "1 2 3").unwrap_err();
        assert!(err.to_string().contains("window"));
    }

    #[test]
    fn test_invalid_axis() {
        let cfg = FilterConfig {
            axis: "sideways".to_string(),
            ..Default::default()
        };
        assert!(run(&cfg, "1 2\n3 4\n").is_err());
    }

    #[test]
    fn test_missing_axis_rejected_for_column() {
        let cfg = FilterConfig {
            axis: "7".to_string(),
            ..config(3, EdgePolicy::Truncate)
        };
        let err = run(&cfg, "5\n1\n9\n").unwrap_err();
        assert!(err.to_string().contains("axis"));
    }

    #[test]
    fn test_unparsable_axis_rejected_for_row() {
        let cfg = FilterConfig {
            axis: "sideways".to_string(),
            ..config(3, EdgePolicy::Truncate)
        };
        assert!(run(&cfg, "5 1 9").is_err());
    }

    #[test]
    fn test_column_across_short_axis_is_unchanged() {
        let cfg = FilterConfig {
            axis: "1".to_string(),
            ..config(3, EdgePolicy::Truncate)
        };
        assert_eq!(run(&cfg, "5\n1\n9\n").unwrap(), "5\n1\n9\n");
    }

    #[test]
    fn test_column_along_explicit_axis() {
        let cfg = FilterConfig {
            axis: "0".to_string(),
            ..config(3, EdgePolicy::Truncate)
        };
        assert_eq!(run(&cfg, "5\n1\n9\n").unwrap(), "3\n5\n5\n");
    }

    #[test]
    fn test_nan_rejected() {
        assert!(run(&FilterConfig::default(), "1\nNaN\n3\n").is_err());
    }
}

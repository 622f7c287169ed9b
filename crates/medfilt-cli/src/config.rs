//! CLI configuration

use clap::ValueEnum;
use config::{Config, ConfigError, Environment, File};
use medfilt::EdgePolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix, e.g. `MEDFILT_WINDOW=5`
pub const ENV_PREFIX: &str = "MEDFILT";

/// How filtered values are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Same row layout as the input, space separated
    #[default]
    Lines,
    /// JSON array (nested for 2-D input)
    Json,
}

/// Filter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Window length in samples
    pub window: usize,

    /// Edge policy: zeropad or truncate
    pub policy: EdgePolicy,

    /// Axis for 2-D input: "auto" or a 0-based index
    pub axis: String,

    /// Output format
    pub format: OutputFormat,

    /// Log level for stderr logging (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            window: 3,
            policy: EdgePolicy::ZeroPad,
            axis: "auto".to_string(),
            format: OutputFormat::Lines,
            log_level: "info".to_string(),
        }
    }
}

impl FilterConfig {
    /// Layer defaults, an optional config file and `MEDFILT_*` variables
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }
}

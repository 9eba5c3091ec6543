//! Benchmark configuration.
//!
//! Defaults match a bare `lanesim run`: 16 elements, the absolute value
//! kernel, a fresh random seed, text output. A YAML file may override any
//! subset of fields; command-line flags override the file.
//!
//! ```yaml
//! size: 64
//! seed: 42
//! kernels: [abs, clamped-exp, array-sum]
//! print_log: false
//! format: json
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BenchError;
use crate::kernels::KernelKind;
use crate::workload::WorkloadSize;

/// Workload size used when none is given.
pub const DEFAULT_SIZE: i64 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(BenchError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    /// Logical workload size; must be positive.
    pub size: i64,
    /// Seed for the workload generator. `None` draws one at random.
    pub seed: Option<u64>,
    pub kernels: Vec<KernelKind>,
    /// Keep and print the per-instruction vector unit log.
    pub print_log: bool,
    pub format: OutputFormat,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            seed: None,
            kernels: vec![KernelKind::Abs],
            print_log: false,
            format: OutputFormat::Text,
        }
    }
}

impl BenchConfig {
    /// Parse a YAML document. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`BenchError::Yaml`] on malformed YAML or unknown fields.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, BenchError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a YAML config file.
    ///
    /// # Errors
    /// Returns [`BenchError::Io`] if the file cannot be read, or
    /// [`BenchError::Yaml`] if it does not parse.
    pub fn load(path: &Path) -> Result<Self, BenchError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Check the configuration and return the validated size.
    ///
    /// # Errors
    /// Returns [`BenchError::InvalidSize`] for a non-positive size and
    /// [`BenchError::Config`] for an empty kernel list.
    pub fn validate(&self) -> Result<WorkloadSize, BenchError> {
        let size = WorkloadSize::new(self.size)?;
        if self.kernels.is_empty() {
            return Err(BenchError::Config {
                field: "kernels".to_string(),
                message: "at least one kernel is required".to_string(),
            });
        }
        Ok(size)
    }
}

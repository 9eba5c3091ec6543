use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("Workload size is set to {0} (must be > 0)")]
    InvalidSize(i64),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {field}: {message}")]
    Config { field: String, message: String },

    #[error("Unknown kernel: {0} (expected abs, clamped-exp, array-sum or all)")]
    UnknownKernel(String),

    #[error("Unknown output format: {0} (expected text or json)")]
    UnknownFormat(String),
}

/// How loudly a verification diagnosis should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Output differs from the gold value.
    Error,
    /// The vector kernel wrote outside its logical range.
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        };
        f.write_str(tag)
    }
}

//! Runtime configuration — command-line flags with environment fallbacks.

use std::path::PathBuf;

use clap::Args;

use crate::logging::{LogFormat, LoggingConfig};

pub const DEFAULT_EVENTS_PATH: &str = "testdata/events.json";
pub const DEFAULT_REQUESTS_PATH: &str = "testdata/requests.json";
pub const DEFAULT_OUTPUT_PATH: &str = "testdata/output.json";
pub const DEFAULT_FIXTURE_PATH: &str = "testdata/input-output.json";

#[derive(Debug, Clone, Args)]
pub struct RuntimeConfig {
    /// Event log (JSON array of {"Event", "Data"})
    #[arg(long, global = true, env = "RATE_QUOTE_EVENTS", default_value = DEFAULT_EVENTS_PATH)]
    pub events: PathBuf,

    /// Request batch (JSON array of {"From", "To", "Weight"})
    #[arg(long, global = true, env = "RATE_QUOTE_REQUESTS", default_value = DEFAULT_REQUESTS_PATH)]
    pub requests: PathBuf,

    /// Where the result batch is written
    #[arg(long, global = true, env = "RATE_QUOTE_OUTPUT", default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Log filter directive
    #[arg(long, global = true, env = "RATE_QUOTE_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log output format
    #[arg(long, global = true, env = "RATE_QUOTE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            events: PathBuf::from(DEFAULT_EVENTS_PATH),
            requests: PathBuf::from(DEFAULT_REQUESTS_PATH),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            log_level: "warn".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl RuntimeConfig {
    pub fn logging(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.log_level.clone(),
            format: self.log_format,
        }
    }
}

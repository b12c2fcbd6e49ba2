// Copyright (c) 2025 the snowflake-client authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Logging setup for the connector.
//!
//! Initializes a `tracing-subscriber` writing to stderr or a file.
//!
//! ## Configuration priority
//!
//! 1. [`LogConfig`] on the connector configuration (highest)
//! 2. `RUST_LOG` environment variable
//! 3. Default: `warn`
//!
//! ```bash
//! RUST_LOG=snowflake_client=debug ./my_app
//! ```

use std::sync::OnceLock;
use tracing_subscriber::{
    fmt::{self, time::SystemTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

static LOGGING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Logging configuration carried on [`ConnectorConfig`](crate::ConnectorConfig).
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// Log level: "off", "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path. If unset, logs go to stderr.
    pub file: Option<String>,
}

/// Initialize the tracing subscriber at most once per process.
///
/// The first [`SnowflakeConnector::connect`] call configures logging;
/// later calls are no-ops, as is running inside an application that has
/// already installed its own subscriber.
///
/// [`SnowflakeConnector::connect`]: crate::SnowflakeConnector::connect
pub(crate) fn init_logging(config: &LogConfig) {
    LOGGING_INITIALIZED.get_or_init(|| {
        if matches!(&config.level, Some(level) if level.eq_ignore_ascii_case("off")) {
            return;
        }

        let filter = match &config.level {
            Some(level) => EnvFilter::new(format!("snowflake_client={}", level.to_lowercase())),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("snowflake_client=warn")),
        };

        match &config.file {
            Some(path) => {
                let file = match std::fs::OpenOptions::new().create(true).append(true).open(path) {
                    Ok(f) => f,
                    Err(e) => {
                        eprintln!("snowflake-client: failed to open log file {path}: {e}");
                        return;
                    }
                };

                tracing_subscriber::registry()
                    .with(filter)
                    .with(
                        fmt::layer()
                            .with_writer(file)
                            .with_target(false)
                            .with_ansi(false)
                            .with_timer(SystemTime),
                    )
                    .try_init()
                    .ok();
            }
            None => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(
                        fmt::layer()
                            .with_writer(std::io::stderr)
                            .with_target(false)
                            .with_timer(SystemTime),
                    )
                    .try_init()
                    .ok();
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::default();
        assert!(config.level.is_none());
        assert!(config.file.is_none());
    }

    #[test]
    fn test_init_logging_off_is_a_noop() {
        let config = LogConfig {
            level: Some("OFF".to_string()),
            file: None,
        };
        // Must not panic or install a subscriber.
        init_logging(&config);
        init_logging(&config);
    }
}

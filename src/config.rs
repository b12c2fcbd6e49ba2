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

//! Connector configuration.

use crate::auth::{AccessToken, AuthProvider};
use crate::client::HttpClientConfig;
use crate::error::{Error, Result};
use crate::logging::LogConfig;
use std::sync::Arc;
use std::time::Duration;

/// Everything needed to open a [`SnowflakeConnector`](crate::SnowflakeConnector).
///
/// Built with [`ConnectorConfig::new`] plus builder methods, or from the
/// `SNOWFLAKE_*` environment variables via [`ConnectorConfig::from_env`].
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    /// Account identifier: an account locator (`xy12345`) or an
    /// organization-qualified name (`myorg-account1`).
    pub account: String,
    /// Login name of the user.
    pub user: String,
    /// Authentication provider.
    pub auth: Arc<dyn AuthProvider>,
    /// Explicit host override (e.g. a local emulator). When unset the host
    /// is derived from the account identifier.
    pub host: Option<String>,
    /// Initial database selection.
    pub database: Option<String>,
    /// Initial schema selection.
    pub schema: Option<String>,
    /// Initial warehouse selection.
    pub warehouse: Option<String>,
    /// Initial role selection.
    pub role: Option<String>,
    /// Server-side statement timeout, in seconds.
    pub statement_timeout_secs: Option<u64>,
    /// Maximum time to wait for a statement to complete.
    pub poll_timeout: Duration,
    /// Interval between status polls.
    pub poll_interval: Duration,
    /// HTTP transport tuning.
    pub http: HttpClientConfig,
    /// Logging setup applied on the first connect.
    pub log: LogConfig,
}

impl ConnectorConfig {
    /// Create a configuration with defaults for everything optional.
    pub fn new(
        account: impl Into<String>,
        user: impl Into<String>,
        auth: Arc<dyn AuthProvider>,
    ) -> Self {
        Self {
            account: account.into(),
            user: user.into(),
            auth,
            host: None,
            database: None,
            schema: None,
            warehouse: None,
            role: None,
            statement_timeout_secs: None,
            poll_timeout: Duration::from_secs(600),
            poll_interval: Duration::from_millis(500),
            http: HttpClientConfig::default(),
            log: LogConfig::default(),
        }
    }

    /// Read the configuration from `SNOWFLAKE_*` environment variables:
    /// `SNOWFLAKE_ACCOUNT`, `SNOWFLAKE_USER` and `SNOWFLAKE_TOKEN` are
    /// required; `SNOWFLAKE_HOST`, `SNOWFLAKE_DATABASE`,
    /// `SNOWFLAKE_SCHEMA`, `SNOWFLAKE_WAREHOUSE` and `SNOWFLAKE_ROLE` are
    /// optional.
    pub fn from_env() -> Result<Self> {
        let account = require_env("SNOWFLAKE_ACCOUNT")?;
        let user = require_env("SNOWFLAKE_USER")?;
        let token = require_env("SNOWFLAKE_TOKEN")?;

        let mut config = Self::new(account, user, Arc::new(AccessToken::programmatic(token)));
        config.host = optional_env("SNOWFLAKE_HOST");
        config.database = optional_env("SNOWFLAKE_DATABASE");
        config.schema = optional_env("SNOWFLAKE_SCHEMA");
        config.warehouse = optional_env("SNOWFLAKE_WAREHOUSE");
        config.role = optional_env("SNOWFLAKE_ROLE");
        Ok(config)
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_warehouse(mut self, warehouse: impl Into<String>) -> Self {
        self.warehouse = Some(warehouse.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_statement_timeout(mut self, secs: u64) -> Self {
        self.statement_timeout_secs = Some(secs);
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_poll_timeout(mut self, timeout: Duration) -> Self {
        self.poll_timeout = timeout;
        self
    }

    /// The base URL requests are sent to.
    ///
    /// Derived from the account identifier unless a host override is set.
    /// Account identifiers are used verbatim except for underscores, which
    /// the hostname form of an account name spells as dashes.
    pub fn base_url(&self) -> String {
        match &self.host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None => format!(
                "https://{}.snowflakecomputing.com",
                self.account.to_lowercase().replace('_', "-")
            ),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.account.trim().is_empty() {
            return Err(Error::InvalidConfig("account must not be empty".to_string()));
        }
        if self.user.trim().is_empty() {
            return Err(Error::InvalidConfig("user must not be empty".to_string()));
        }
        if self.poll_interval.is_zero() {
            return Err(Error::InvalidConfig(
                "poll interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| Error::InvalidConfig(format!("environment variable {name} is not set")))
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ConnectorConfig {
        ConnectorConfig::new(
            "xy12345",
            "alice",
            Arc::new(AccessToken::programmatic("token")),
        )
    }

    #[test]
    fn test_base_url_from_account() {
        assert_eq!(
            test_config().base_url(),
            "https://xy12345.snowflakecomputing.com"
        );
    }

    #[test]
    fn test_base_url_org_account_underscore() {
        let config = ConnectorConfig::new(
            "MYORG-ACCOUNT_1",
            "alice",
            Arc::new(AccessToken::programmatic("token")),
        );
        assert_eq!(
            config.base_url(),
            "https://myorg-account-1.snowflakecomputing.com"
        );
    }

    #[test]
    fn test_base_url_host_override() {
        let config = test_config().with_host("http://localhost:8080/");
        assert_eq!(config.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_builder_methods() {
        let config = test_config()
            .with_database("SNOWFLAKE_SAMPLE_DATA")
            .with_warehouse("COMPUTE_WH")
            .with_role("SYSADMIN")
            .with_schema("TPCH_SF1")
            .with_statement_timeout(120);
        assert_eq!(config.database.as_deref(), Some("SNOWFLAKE_SAMPLE_DATA"));
        assert_eq!(config.warehouse.as_deref(), Some("COMPUTE_WH"));
        assert_eq!(config.role.as_deref(), Some("SYSADMIN"));
        assert_eq!(config.schema.as_deref(), Some("TPCH_SF1"));
        assert_eq!(config.statement_timeout_secs, Some(120));
    }

    #[test]
    fn test_validate_rejects_empty_account() {
        let mut config = test_config();
        config.account = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_poll_interval() {
        let mut config = test_config();
        config.poll_interval = Duration::ZERO;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }
}

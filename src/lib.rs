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

//! Snowflake SQL client for Rust
//!
//! A convenience layer over the Snowflake SQL API: connection setup,
//! statement execution, result materialization, and session-state helpers
//! for the current warehouse, database, schema and role.
//!
//! ## Overview
//!
//! - [`SnowflakeConnector`] — the facade. Owns the HTTP transport and a
//!   tokio runtime; every operation is one synchronous call.
//! - [`ResultSet`] — rows, per-column metadata, and the original SQL text
//!   of one executed statement.
//! - Session helpers ([`SnowflakeConnector::warehouse`] and friends) —
//!   one- and two-method objects translating semantic operations into SQL.
//! - [`SnowflakeClient`] — the vendor-client seam; swap in your own
//!   transport with [`SnowflakeConnector::with_client`].
//!
//! ## Example
//!
//! ```ignore
//! use snowflake_client::{AccessToken, ConnectorConfig, SnowflakeConnector};
//! use std::sync::Arc;
//!
//! let config = ConnectorConfig::new(
//!     "xy12345",
//!     "ALICE",
//!     Arc::new(AccessToken::programmatic("...")),
//! )
//! .with_database("SNOWFLAKE_SAMPLE_DATA");
//!
//! let connector = SnowflakeConnector::connect(config)?;
//! assert!(connector.connected());
//!
//! connector.warehouse().use_("COMPUTE_WH", false)?;
//! let schemas = connector.query("SHOW SCHEMAS;")?;
//! println!("{} schemas, first: {:?}", schemas.num_rows(), schemas.scalar(0, 1)?);
//!
//! let batch = connector.query_arrow("SELECT * FROM TPCH_SF1.NATION")?;
//! ```
//!
//! ## Configuration
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `account` / `user` | — | Account identifier and login name |
//! | `auth` | — | [`AccessToken`] or [`KeyPairJwt`] |
//! | `host` | derived | Endpoint override (e.g. a local emulator) |
//! | `database` / `schema` / `warehouse` / `role` | unset | Initial session selections |
//! | `statement_timeout_secs` | server default | Server-side statement timeout |
//! | `poll_timeout` | 600s | Client-side completion deadline |
//! | `poll_interval` | 500ms | Delay between status polls |
//!
//! `ConnectorConfig::from_env()` reads the same settings from
//! `SNOWFLAKE_*` environment variables.

pub mod arrow;
pub mod auth;
pub mod client;
pub mod config;
pub mod connector;
pub mod elements;
pub mod error;
pub mod logging;
pub mod result;
pub mod session;
pub mod sql;
pub mod types;

// Re-export main types
pub use auth::{AccessToken, AuthProvider, KeyPairJwt};
pub use config::ConnectorConfig;
pub use connector::SnowflakeConnector;
pub use error::{Error, Result};
pub use result::{ColumnDescription, ResultSet};
pub use session::Environment;

// Re-export client types for advanced users
pub use client::{HttpClient, HttpClientConfig, SnowflakeClient, SqlApiClient, StatementOutcome};

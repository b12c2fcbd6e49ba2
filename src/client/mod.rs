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

//! Client layer for communicating with the Snowflake service.
//!
//! This module provides:
//! - `SnowflakeClient` trait: the vendor-client seam the facade talks to
//! - `HttpClient`: low-level HTTP transport with retry logic
//! - `SqlApiClient`: implementation speaking the SQL API v2 (REST)

pub mod http;
pub mod rest;

use crate::error::Result;
use crate::types::api::{StatementRequest, StatementResponse};
use async_trait::async_trait;

pub use http::{HttpClient, HttpClientConfig};
pub use rest::SqlApiClient;

/// Result of submitting a statement or polling its status.
#[derive(Debug, Clone)]
pub enum StatementOutcome {
    /// The statement finished and the response carries its result.
    Complete(Box<StatementResponse>),
    /// The statement is still executing; poll the handle.
    Running { statement_handle: String },
}

/// Abstract interface to the statement-execution service.
///
/// Everything above this trait is convenience; everything below it is
/// protocol plumbing. The facade drives completion polling itself, so
/// implementations only translate individual calls to the wire.
#[async_trait]
pub trait SnowflakeClient: Send + Sync + std::fmt::Debug {
    /// Submit a statement for execution.
    async fn submit_statement(&self, request: &StatementRequest) -> Result<StatementOutcome>;

    /// Poll the status of a previously submitted statement.
    async fn statement_status(&self, statement_handle: &str) -> Result<StatementOutcome>;

    /// Fetch one partition of a completed statement's result set.
    ///
    /// Partition 0 is delivered with the completed response; this is only
    /// called for partitions 1 and up.
    async fn fetch_partition(
        &self,
        statement_handle: &str,
        partition: usize,
    ) -> Result<StatementResponse>;

    /// Cancel a running statement.
    async fn cancel_statement(&self, statement_handle: &str) -> Result<()>;
}

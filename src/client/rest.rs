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

//! SQL API v2 client implementation.
//!
//! Implements the [`SnowflakeClient`] trait against the REST endpoints
//! under `/api/v2/statements`. A statement is submitted with a fresh
//! request id; the service answers 200 with the complete result, or 202
//! with a statement handle that the caller polls. Additional result
//! partitions are fetched with the `partition` query parameter.

use crate::client::{HttpClient, SnowflakeClient, StatementOutcome};
use crate::error::{Error, Result};
use crate::types::api::{ApiErrorBody, StatementRequest, StatementResponse};
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// REST client for the Snowflake SQL API.
#[derive(Debug)]
pub struct SqlApiClient {
    http: Arc<HttpClient>,
    base_url: String,
}

impl SqlApiClient {
    /// Create a client for the given account host, e.g.
    /// `https://xy12345.snowflakecomputing.com`.
    pub fn new(http: Arc<HttpClient>, host: impl Into<String>) -> Self {
        let host = host.into();
        Self {
            base_url: format!("{}/api/v2", host.trim_end_matches('/')),
            http,
        }
    }

    fn statements_url(&self) -> String {
        format!("{}/statements", self.base_url)
    }

    fn statement_url(&self, statement_handle: &str) -> String {
        format!("{}/statements/{}", self.base_url, statement_handle)
    }

    /// Interpret a (status, body) pair from submit or status-poll calls.
    fn parse_outcome(status: StatusCode, body: &str) -> Result<StatementOutcome> {
        match status {
            StatusCode::OK => {
                let response = parse_response(body)?;
                Ok(StatementOutcome::Complete(Box::new(response)))
            }
            StatusCode::ACCEPTED => {
                let response = parse_response(body)?;
                let statement_handle = response.statement_handle.ok_or_else(|| {
                    Error::Response(
                        "in-progress response carried no statement handle".to_string(),
                    )
                })?;
                Ok(StatementOutcome::Running { statement_handle })
            }
            _ => Err(api_error(status, body)),
        }
    }
}

fn parse_response(body: &str) -> Result<StatementResponse> {
    serde_json::from_str(body)
        .map_err(|e| Error::Response(format!("failed to decode statement response: {e} - body: {body}")))
}

/// Map a non-success response to [`Error::Api`], falling back to a
/// transport error when the body is not the documented error payload.
fn api_error(status: StatusCode, body: &str) -> Error {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if parsed.message.is_some() || parsed.code.is_some() => Error::Api {
            code: parsed.code.unwrap_or_else(|| status.as_u16().to_string()),
            message: parsed
                .message
                .unwrap_or_else(|| "unknown service error".to_string()),
            sql_state: parsed.sql_state.unwrap_or_default(),
        },
        _ => Error::Http(format!("HTTP {} - {}", status.as_u16(), body)),
    }
}

#[async_trait]
impl SnowflakeClient for SqlApiClient {
    async fn submit_statement(&self, request: &StatementRequest) -> Result<StatementOutcome> {
        // One request id for the statement; HTTP-level retries reuse it so
        // the service can deduplicate resubmissions.
        let request_id = Uuid::new_v4();
        let url = format!("{}?requestId={}", self.statements_url(), request_id);

        debug!(%request_id, "submitting statement: {}", request.statement);

        let (status, body) = self.http.send_json(Method::POST, &url, Some(request)).await?;
        Self::parse_outcome(status, &body)
    }

    async fn statement_status(&self, statement_handle: &str) -> Result<StatementOutcome> {
        let url = self.statement_url(statement_handle);

        debug!(%statement_handle, "polling statement status");

        let (status, body) = self
            .http
            .send_json::<()>(Method::GET, &url, None)
            .await?;
        Self::parse_outcome(status, &body)
    }

    async fn fetch_partition(
        &self,
        statement_handle: &str,
        partition: usize,
    ) -> Result<StatementResponse> {
        let url = format!(
            "{}?partition={}",
            self.statement_url(statement_handle),
            partition
        );

        debug!(%statement_handle, partition, "fetching result partition");

        let (status, body) = self
            .http
            .send_json::<()>(Method::GET, &url, None)
            .await?;
        match status {
            StatusCode::OK => parse_response(&body),
            _ => Err(api_error(status, &body)),
        }
    }

    async fn cancel_statement(&self, statement_handle: &str) -> Result<()> {
        let url = format!("{}/cancel", self.statement_url(statement_handle));

        debug!(%statement_handle, "canceling statement");

        let (status, body) = self
            .http
            .send_json::<()>(Method::POST, &url, None)
            .await?;
        if status.is_success() {
            Ok(())
        } else {
            Err(api_error(status, &body))
        }
    }
}

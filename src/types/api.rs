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

//! SQL API v2 request/response types.
//!
//! These types map directly to the JSON structures used by the Snowflake
//! SQL API (`/api/v2/statements`). They are primarily used by
//! [`SqlApiClient`](crate::client::SqlApiClient).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Request body for statement submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementRequest {
    /// The SQL text to execute, verbatim.
    pub statement: String,
    /// Server-side statement timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warehouse: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Session parameters forwarded with the statement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<HashMap<String, String>>,
}

/// Response body for a completed statement, a status poll, or a partition
/// fetch.
///
/// The same shape is returned by all three endpoints; which fields are
/// populated depends on the call. An in-progress statement (HTTP 202)
/// carries only the handle, status URL, and a progress message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementResponse {
    #[serde(default)]
    pub result_set_meta_data: Option<ResultSetMetaData>,
    /// Result rows for this partition. Each cell is the JSON wire value;
    /// `null` cells are SQL NULLs.
    #[serde(default)]
    pub data: Option<Vec<Vec<Option<String>>>>,
    #[serde(default)]
    pub statement_handle: Option<String>,
    #[serde(default)]
    pub statement_status_url: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub sql_state: Option<String>,
    #[serde(default)]
    pub created_on: Option<i64>,
}

/// Metadata describing a result set.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSetMetaData {
    /// Total rows across all partitions.
    pub num_rows: i64,
    /// Result encoding; this client always requests and expects `jsonv2`.
    pub format: String,
    #[serde(default)]
    pub row_type: Vec<RowType>,
    #[serde(default)]
    pub partition_info: Option<Vec<PartitionInfo>>,
}

/// Per-column metadata from `resultSetMetaData.rowType`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowType {
    pub name: String,
    /// Snowflake logical type ("fixed", "text", "timestamp_ntz", ...).
    #[serde(rename = "type")]
    pub column_type: String,
    #[serde(default)]
    pub precision: Option<i32>,
    #[serde(default)]
    pub scale: Option<i32>,
    #[serde(default)]
    pub length: Option<i64>,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub table: Option<String>,
}

fn default_nullable() -> bool {
    true
}

/// Size information for one result partition.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionInfo {
    pub row_count: i64,
    #[serde(default)]
    pub uncompressed_size: Option<i64>,
    #[serde(default)]
    pub compressed_size: Option<i64>,
}

/// Error payload returned with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub sql_state: Option<String>,
    #[serde(default)]
    pub statement_handle: Option<String>,
}

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

//! Error types for the Snowflake SQL API client.

use std::time::Duration;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// All errors surfaced by this crate.
///
/// Errors raised by the service itself arrive as [`Error::Api`], carrying
/// the vendor error code and SQLSTATE verbatim. Everything else describes a
/// failure in this layer: transport, authentication material, response
/// decoding, or a result set that does not have the shape the caller
/// assumed.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The connector configuration is unusable (missing account, bad URL, ...).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Authentication material could not be loaded or a token could not be minted.
    #[error("authentication error: {0}")]
    Auth(String),

    /// The HTTP request failed after exhausting retries.
    #[error("http transport error: {0}")]
    Http(String),

    /// The service answered with a well-formed error payload.
    #[error("snowflake error {code} (sqlstate {sql_state}): {message}")]
    Api {
        code: String,
        message: String,
        sql_state: String,
    },

    /// The service answered with a body this client could not decode.
    #[error("malformed response: {0}")]
    Response(String),

    /// A statement did not complete within the configured poll deadline.
    #[error("statement did not complete within {0:?}")]
    Timeout(Duration),

    /// A result set did not have the expected number of rows or columns.
    #[error("unexpected result shape: {0}")]
    ResultShape(String),

    /// The tokio runtime backing the synchronous facade could not be created.
    #[error("runtime error: {0}")]
    Runtime(String),

    /// Building an Arrow record batch from a result set failed.
    #[error("arrow error: {0}")]
    Arrow(#[from] arrow_schema::ArrowError),
}

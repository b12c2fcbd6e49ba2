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

//! HTTP transport for the SQL API.
//!
//! A thin wrapper over `reqwest` providing:
//! - connection pooling (via reqwest)
//! - bounded retry with exponential backoff for transient failures
//! - per-attempt authentication headers (key-pair JWTs are re-minted on
//!   every attempt, so a retry never sends an expired token)
//! - configurable timeouts and user agent

use crate::auth::AuthProvider;
use crate::error::{Error, Result};
use reqwest::{Client, Method, StatusCode};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Tuning for the HTTP transport.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Read timeout for a single request.
    pub read_timeout: Duration,
    /// Retry attempts after the first failure.
    pub max_retries: u32,
    /// Base delay between retries (doubles each attempt).
    pub retry_delay: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            read_timeout: Duration::from_secs(60),
            max_retries: 4,
            retry_delay: Duration::from_millis(500),
            user_agent: format!("snowflake-client-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// HTTP client used by [`SqlApiClient`](crate::client::SqlApiClient).
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    auth: Arc<dyn AuthProvider>,
}

impl HttpClient {
    /// Build a pooled client from the configuration and auth provider.
    pub fn new(config: HttpClientConfig, auth: Arc<dyn AuthProvider>) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.read_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::Http(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            auth,
        })
    }

    /// Returns the transport configuration.
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Send a JSON request, retrying transient failures.
    ///
    /// The body is serialized once; each attempt rebuilds the request and
    /// refreshes the authentication headers. Returns the final status and
    /// body text — the caller interprets both, since the SQL API uses
    /// non-200 success statuses (202 for in-progress statements) and error
    /// payloads the transport should not try to understand.
    ///
    /// Retried: 408, 429, 502, 503, 504 and transport-level connect or
    /// timeout errors. Everything else is returned as-is.
    pub async fn send_json<B: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<(StatusCode, String)> {
        let body_bytes = match body {
            Some(b) => Some(
                serde_json::to_vec(b)
                    .map_err(|e| Error::Response(format!("failed to encode request body: {e}")))?,
            ),
            None => None,
        };

        let mut attempt = 0u32;
        loop {
            attempt += 1;

            let mut request = self
                .client
                .request(method.clone(), url)
                .header("Accept", "application/json")
                .header("Authorization", self.auth.auth_header()?)
                .header(
                    "X-Snowflake-Authorization-Token-Type",
                    self.auth.token_type(),
                );
            if let Some(ref bytes) = body_bytes {
                request = request
                    .header("Content-Type", "application/json")
                    .body(bytes.clone());
            }

            debug!(
                "{} {} (attempt {}/{})",
                method,
                url,
                attempt,
                self.config.max_retries + 1
            );

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if is_retryable_status(status) && attempt <= self.config.max_retries {
                        warn!(
                            "request to {} failed with {}, retrying ({}/{})",
                            url,
                            status,
                            attempt,
                            self.config.max_retries + 1
                        );
                        self.backoff(attempt).await;
                        continue;
                    }

                    let text = response
                        .text()
                        .await
                        .map_err(|e| Error::Http(format!("failed to read response body: {e}")))?;
                    return Ok((status, text));
                }
                Err(e) => {
                    if is_retryable_transport_error(&e) && attempt <= self.config.max_retries {
                        warn!(
                            "request to {} failed ({}), retrying ({}/{})",
                            url,
                            e,
                            attempt,
                            self.config.max_retries + 1
                        );
                        self.backoff(attempt).await;
                        continue;
                    }

                    return Err(Error::Http(format!(
                        "request failed after {attempt} attempt(s): {e}"
                    )));
                }
            }
        }
    }

    async fn backoff(&self, attempt: u32) {
        let delay = self.config.retry_delay * 2u32.saturating_pow(attempt.saturating_sub(1));
        debug!("waiting {:?} before retry", delay);
        sleep(delay).await;
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::REQUEST_TIMEOUT
            | StatusCode::TOO_MANY_REQUESTS
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}

fn is_retryable_transport_error(error: &reqwest::Error) -> bool {
    error.is_timeout() || error.is_connect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AccessToken;

    #[test]
    fn test_http_client_config_default() {
        let config = HttpClientConfig::default();
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
        assert_eq!(config.read_timeout, Duration::from_secs(60));
        assert_eq!(config.max_retries, 4);
        assert!(config.user_agent.starts_with("snowflake-client-rust/"));
    }

    #[test]
    fn test_is_retryable_status() {
        assert!(is_retryable_status(StatusCode::REQUEST_TIMEOUT));
        assert!(is_retryable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable_status(StatusCode::BAD_GATEWAY));
        assert!(is_retryable_status(StatusCode::SERVICE_UNAVAILABLE));
        assert!(is_retryable_status(StatusCode::GATEWAY_TIMEOUT));

        assert!(!is_retryable_status(StatusCode::OK));
        assert!(!is_retryable_status(StatusCode::ACCEPTED));
        assert!(!is_retryable_status(StatusCode::BAD_REQUEST));
        assert!(!is_retryable_status(StatusCode::UNPROCESSABLE_ENTITY));
        assert!(!is_retryable_status(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn test_http_client_creation() {
        let auth = Arc::new(AccessToken::programmatic("test-token"));
        let client = HttpClient::new(HttpClientConfig::default(), auth);
        assert!(client.is_ok());
    }
}

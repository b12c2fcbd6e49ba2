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

//! Authentication providers for the SQL API.
//!
//! Every request carries an `Authorization` header plus the
//! `X-Snowflake-Authorization-Token-Type` marker that tells the service how
//! to interpret the token. Two providers are available:
//!
//! - [`AccessToken`]: a pre-issued bearer token (OAuth access token or
//!   programmatic access token).
//! - [`KeyPairJwt`]: mints a short-lived RS256 JWT from a registered RSA
//!   key pair on every request.

use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Source of the `Authorization` header for API requests.
pub trait AuthProvider: Send + Sync + std::fmt::Debug {
    /// The full `Authorization` header value, e.g. `Bearer <token>`.
    fn auth_header(&self) -> Result<String>;

    /// Value of the `X-Snowflake-Authorization-Token-Type` header.
    fn token_type(&self) -> &'static str;
}

/// A pre-issued bearer token.
#[derive(Clone)]
pub struct AccessToken {
    token: String,
    token_type: &'static str,
}

impl AccessToken {
    /// A programmatic access token issued for the user.
    pub fn programmatic(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            token_type: "PROGRAMMATIC_ACCESS_TOKEN",
        }
    }

    /// An OAuth access token obtained from an external flow.
    pub fn oauth(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            token_type: "OAUTH",
        }
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("token_type", &self.token_type)
            .finish()
    }
}

impl AuthProvider for AccessToken {
    fn auth_header(&self) -> Result<String> {
        Ok(format!("Bearer {}", self.token))
    }

    fn token_type(&self) -> &'static str {
        self.token_type
    }
}

/// Key-pair authentication: a fresh RS256 JWT per request.
///
/// The issuer is `ACCOUNT.USER.SHA256:<fingerprint>` where the fingerprint
/// identifies the public key registered for the user; the subject is
/// `ACCOUNT.USER`. Tokens are minted with a short lifetime and never
/// cached, so clock skew on long-lived connectors is not a concern.
pub struct KeyPairJwt {
    issuer: String,
    subject: String,
    encoding_key: EncodingKey,
    lifetime: Duration,
}

#[derive(Serialize)]
struct Claims {
    iss: String,
    sub: String,
    iat: u64,
    exp: u64,
}

impl KeyPairJwt {
    /// Default token lifetime. The service rejects anything over an hour.
    pub const DEFAULT_LIFETIME: Duration = Duration::from_secs(59 * 60);

    /// Build a provider from a PKCS#8 RSA private key in PEM form and the
    /// SHA-256 fingerprint of the registered public key.
    ///
    /// The fingerprint may be given with or without its `SHA256:` prefix;
    /// [`key_fingerprint`] computes it from the public key DER.
    pub fn new(
        account: &str,
        user: &str,
        private_key_pem: &[u8],
        public_key_fingerprint: &str,
    ) -> Result<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(private_key_pem)
            .map_err(|e| Error::Auth(format!("failed to load RSA private key: {e}")))?;

        let subject = qualified_user(account, user);
        let issuer = format!(
            "{}.{}",
            subject,
            normalize_fingerprint(public_key_fingerprint)
        );

        Ok(Self {
            issuer,
            subject,
            encoding_key,
            lifetime: Self::DEFAULT_LIFETIME,
        })
    }

    /// Override the token lifetime.
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }
}

impl std::fmt::Debug for KeyPairJwt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPairJwt")
            .field("issuer", &self.issuer)
            .field("subject", &self.subject)
            .field("lifetime", &self.lifetime)
            .finish()
    }
}

impl AuthProvider for KeyPairJwt {
    fn auth_header(&self) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| Error::Auth(format!("system clock before unix epoch: {e}")))?
            .as_secs();

        let claims = Claims {
            iss: self.issuer.clone(),
            sub: self.subject.clone(),
            iat: now,
            exp: now + self.lifetime.as_secs(),
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.encoding_key)
            .map_err(|e| Error::Auth(format!("failed to sign JWT: {e}")))?;

        Ok(format!("Bearer {token}"))
    }

    fn token_type(&self) -> &'static str {
        "KEYPAIR_JWT"
    }
}

/// `ACCOUNT.USER`, uppercased the way the token validator expects. The
/// region suffix of a legacy account locator is not part of the identity.
fn qualified_user(account: &str, user: &str) -> String {
    let account = account
        .split('.')
        .next()
        .unwrap_or(account)
        .to_uppercase();
    format!("{}.{}", account, user.to_uppercase())
}

fn normalize_fingerprint(fingerprint: &str) -> String {
    if let Some(rest) = fingerprint.strip_prefix("SHA256:") {
        format!("SHA256:{rest}")
    } else {
        format!("SHA256:{fingerprint}")
    }
}

/// SHA-256 fingerprint of a public key, from its DER encoding.
///
/// Matches the fingerprint Snowflake reports in `DESCRIBE USER` as
/// `RSA_PUBLIC_KEY_FP`.
pub fn key_fingerprint(public_key_der: &[u8]) -> String {
    let digest = Sha256::digest(public_key_der);
    format!("SHA256:{}", STANDARD.encode(digest))
}

//! Bearer Token Service
//!
//! Issues and verifies HS256-signed, time-limited tokens carrying the
//! subject's account id (`jti`), a human-readable subject label (`sub`)
//! and an audience (`aud`).
//!
//! The signing secret is injected through [`TokenConfig`]; there is no
//! process-wide key.

use std::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind as JwtErrorKind,
};
use rand::{Rng, distributions::Alphanumeric};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// Default token lifetime (24 hours)
pub const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

/// Audience used when the caller does not supply one
pub const DEFAULT_AUDIENCE: &str = "Temporary";

/// Subject label used when the caller does not supply one
pub const DEFAULT_SUBJECT: &str = "Temporary token";

const NONCE_LENGTH: usize = 16;
const MIN_SECRET_LENGTH: usize = 32;

// ============================================================================
// Configuration
// ============================================================================

/// Token service configuration
#[derive(Clone)]
pub struct TokenConfig {
    /// HMAC signing secret
    pub secret: Vec<u8>,
    /// Lifetime applied at issuance
    pub lifetime: Duration,
}

impl TokenConfig {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            lifetime: DEFAULT_TOKEN_LIFETIME,
        }
    }

    /// Create config with a random secret (for development/testing)
    pub fn with_random_secret() -> Self {
        let mut secret = vec![0u8; 64];
        rand::thread_rng().fill(&mut secret[..]);
        Self::new(secret)
    }

    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Whether the secret is long enough for HS256
    pub fn has_strong_secret(&self) -> bool {
        self.secret.len() >= MIN_SECRET_LENGTH
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"[REDACTED]")
            .field("lifetime", &self.lifetime)
            .finish()
    }
}

// ============================================================================
// Claims
// ============================================================================

/// Decoded token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Audience; a token without one is rejected by the interceptor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    /// Subject label
    #[serde(default)]
    pub sub: String,
    /// Subject account id
    #[serde(default)]
    pub jti: String,
    /// Issued at (Unix seconds)
    pub iat: u64,
    /// Expires at (Unix seconds)
    pub exp: u64,
    #[serde(default)]
    pub nonce: String,
}

/// Issuance request
#[derive(Debug, Clone, Default)]
pub struct TokenRequest {
    pub subject_id: String,
    pub audience: Option<String>,
    pub subject: Option<String>,
}

/// Result of issuing a token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    /// Unix seconds
    pub issued_at: u64,
    /// Unix seconds
    pub expires_at: u64,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token is malformed")]
    Malformed,

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token has expired")]
    Expired,

    #[error("Token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            JwtErrorKind::InvalidSignature => TokenError::SignatureInvalid,
            JwtErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        }
    }
}

// ============================================================================
// Service
// ============================================================================

/// Stateless token issuer/verifier
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl TokenService {
    pub fn new(config: &TokenConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the caller's clock in `verify_at`
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(&config.secret),
            decoding_key: DecodingKey::from_secret(&config.secret),
            validation,
            lifetime: config.lifetime,
        }
    }

    /// Issue a token using the system clock
    pub fn issue(&self, request: &TokenRequest) -> Result<IssuedToken, TokenError> {
        self.issue_at(request, now_millis())
    }

    /// Issue a token as of `now_ms` (Unix milliseconds)
    ///
    /// `iat` and `exp` are ceiling-rounded to whole seconds.
    pub fn issue_at(&self, request: &TokenRequest, now_ms: u64) -> Result<IssuedToken, TokenError> {
        let lifetime_ms = u64::try_from(self.lifetime.as_millis()).unwrap_or(u64::MAX);
        let issued_at = now_ms.div_ceil(1000);
        let expires_at = now_ms.saturating_add(lifetime_ms).div_ceil(1000);

        let claims = TokenClaims {
            aud: Some(non_empty_or(request.audience.as_deref(), DEFAULT_AUDIENCE)),
            sub: non_empty_or(request.subject.as_deref(), DEFAULT_SUBJECT),
            jti: request.subject_id.clone(),
            iat: issued_at,
            exp: expires_at,
            nonce: random_nonce(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)?;

        tracing::debug!(jti = %claims.jti, exp = expires_at, "Token issued");

        Ok(IssuedToken {
            token,
            issued_at,
            expires_at,
        })
    }

    /// Verify a token against the system clock
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.verify_at(token, now_millis() / 1000)
    }

    /// Verify signature, then expiry as of `now_secs` (zero leeway)
    pub fn verify_at(&self, token: &str, now_secs: u64) -> Result<TokenClaims, TokenError> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?;

        if data.claims.exp <= now_secs {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("keys", &"[REDACTED]")
            .field("lifetime", &self.lifetime)
            .finish()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}

fn non_empty_or(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

fn random_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LENGTH)
        .map(char::from)
        .collect()
}

//! API DTOs (Data Transfer Objects)

use serde::Deserialize;
use serde_json::Value;

use crate::application::{SignInInput, SignUpInput};

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    #[serde(default)]
    pub name: Option<String>,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Client-side hints; accepted and ignored
    #[serde(default)]
    pub flags: Option<Value>,
}

impl From<SignUpRequest> for SignUpInput {
    fn from(req: SignUpRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            password: req.password,
            phone: req.phone,
        }
    }
}

// ============================================================================
// Sign In
// ============================================================================

/// Sign in request
#[derive(Debug, Clone, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

impl From<SignInRequest> for SignInInput {
    fn from(req: SignInRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
        }
    }
}

// ============================================================================
// Token Query
// ============================================================================

/// Query parameters the interceptor reads
///
/// Token names are checked in declaration order; the first non-empty one wins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenQuery {
    pub token: Option<String>,
    pub access_token: Option<String>,
    pub ugs_token: Option<String>,
    pub admin_token: Option<String>,
    pub app_token: Option<String>,
    #[serde(rename = "isLogout")]
    pub is_logout: Option<String>,
}

impl TokenQuery {
    pub fn token(&self) -> Option<&str> {
        [
            &self.token,
            &self.access_token,
            &self.ugs_token,
            &self.admin_token,
            &self.app_token,
        ]
        .into_iter()
        .filter_map(|value| value.as_deref())
        .find(|value| !value.trim().is_empty())
    }

    /// Logout intent: any value except empty, `false` or `0`
    pub fn is_logout(&self) -> bool {
        match self.is_logout.as_deref().map(str::trim) {
            None | Some("") | Some("0") => false,
            Some(flag) => !flag.eq_ignore_ascii_case("false"),
        }
    }
}

//! Application Configuration
//!
//! Configuration for the Auth application layer, and the services built
//! from it once at startup.

use platform::password::{HashCost, PasswordHasher};
use platform::token::{TokenConfig, TokenService};

use crate::error::AuthResult;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Token signing secret and lifetime
    pub token: TokenConfig,
    /// Argon2id work factor
    pub hash_cost: HashCost,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl AuthConfig {
    pub fn new(token: TokenConfig) -> Self {
        Self {
            token,
            hash_cost: HashCost::default(),
            password_pepper: None,
        }
    }

    /// Random signing secret and the cheapest Argon2 parameters, for tests
    pub fn testing() -> Self {
        Self {
            hash_cost: HashCost::testing(),
            ..Self::new(TokenConfig::with_random_secret())
        }
    }

    /// Build the token service and password hasher
    pub fn build_services(&self) -> AuthResult<AuthServices> {
        let hasher = PasswordHasher::new(self.hash_cost, self.password_pepper.clone())?;
        let tokens = TokenService::new(&self.token);

        Ok(AuthServices { tokens, hasher })
    }
}

/// Stateless services shared by every request
#[derive(Debug, Clone)]
pub struct AuthServices {
    pub tokens: TokenService,
    pub hasher: PasswordHasher,
}

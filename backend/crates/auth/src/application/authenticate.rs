//! Authenticate Use Case
//!
//! Resolves a presented bearer token to the request principal:
//! verify, check the audience, then look the subject up.

use std::sync::Arc;

use kernel::id::UserId;
use platform::token::TokenError;

use crate::application::config::AuthServices;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_lookup::UserLookup;
use crate::error::{AuthError, AuthResult};

/// Authenticated identity attached to a request
///
/// Read-only for the rest of the request; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Account id (the token's `jti`)
    pub id: UserId,
    /// Principal type (the token's audience)
    pub audience: String,
    /// The token as presented
    pub token: String,
}

/// Authenticate input
#[derive(Debug, Default)]
pub struct AuthenticateInput {
    /// Token extracted from query or header
    pub token: Option<String>,
    /// Request is a logout
    pub is_logout: bool,
}

/// Authenticate use case
pub struct AuthenticateUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    services: Arc<AuthServices>,
}

impl<R> AuthenticateUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, services: Arc<AuthServices>) -> Self {
        Self { repo, services }
    }

    pub async fn execute(&self, input: AuthenticateInput) -> AuthResult<Principal> {
        let token = input.token.ok_or(AuthError::TokenMissing)?;

        let claims = match self.services.tokens.verify(&token) {
            Ok(claims) => claims,
            Err(TokenError::Expired) if input.is_logout => return Err(AuthError::ExpiredOnLogout),
            Err(e) => {
                tracing::debug!(reason = %e, "Token verification failed");
                return Err(AuthError::TokenInvalid);
            }
        };

        let audience = claims
            .aud
            .filter(|aud| !aud.is_empty())
            .ok_or(AuthError::MissingAudience)?;

        // A subject that is not one of our ids cannot name an account
        let id: UserId = claims
            .jti
            .parse()
            .map_err(|_| AuthError::TokenUserNotFound)?;

        self.repo
            .find_one(&UserLookup::Id(id))
            .await?
            .ok_or(AuthError::TokenUserNotFound)?;

        tracing::debug!(user_id = %id, audience = %audience, "Token verified");

        Ok(Principal {
            id,
            audience,
            token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::AuthConfig;
    use crate::domain::entity::user::User;
    use crate::domain::value_object::email::Email;
    use crate::infra::document::DocumentUserRepository;
    use platform::store::MemoryDocumentStore;
    use platform::token::{TokenClaims, TokenRequest};
    use std::time::{SystemTime, UNIX_EPOCH};

    type Repo = DocumentUserRepository<MemoryDocumentStore>;

    async fn fixture() -> (AuthenticateUseCase<Repo>, Arc<AuthServices>, User) {
        let repo = Arc::new(DocumentUserRepository::in_memory());
        let services = Arc::new(AuthConfig::testing().build_services().unwrap());
        let user = User::new(
            None,
            Email::new("jane@example.com").unwrap(),
            "$argon2id$unused".to_string(),
            None,
        );
        repo.create(&user).await.unwrap();

        (
            AuthenticateUseCase::new(repo, services.clone()),
            services,
            user,
        )
    }

    fn now_ms() -> u64 {
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_millis() as u64
    }

    fn request(subject_id: String) -> TokenRequest {
        TokenRequest {
            subject_id,
            audience: Some("user".to_string()),
            subject: Some("User Token".to_string()),
        }
    }

    fn input(token: &str, is_logout: bool) -> AuthenticateInput {
        AuthenticateInput {
            token: Some(token.to_string()),
            is_logout,
        }
    }

    #[tokio::test]
    async fn test_valid_token_resolves_principal() {
        let (use_case, services, user) = fixture().await;
        let issued = services.tokens.issue(&request(user.id.to_string())).unwrap();

        let principal = use_case.execute(input(&issued.token, false)).await.unwrap();
        assert_eq!(principal.id, user.id);
        assert_eq!(principal.audience, "user");
        assert_eq!(principal.token, issued.token);
    }

    #[tokio::test]
    async fn test_missing_token() {
        let (use_case, _, _) = fixture().await;
        let err = use_case.execute(AuthenticateInput::default()).await.unwrap_err();
        assert!(matches!(err, AuthError::TokenMissing));
    }

    #[tokio::test]
    async fn test_expired_token() {
        let (use_case, services, user) = fixture().await;
        // Issued two days ago: expired a day ago
        let issued = services
            .tokens
            .issue_at(&request(user.id.to_string()), now_ms() - 2 * 86_400_000)
            .unwrap();

        let err = use_case.execute(input(&issued.token, false)).await.unwrap_err();
        assert!(matches!(err, AuthError::TokenInvalid));

        let err = use_case.execute(input(&issued.token, true)).await.unwrap_err();
        assert!(matches!(err, AuthError::ExpiredOnLogout));
    }

    #[tokio::test]
    async fn test_logout_flag_does_not_rescue_bad_signature() {
        let (use_case, _, user) = fixture().await;
        let foreign = AuthConfig::testing().build_services().unwrap();
        let issued = foreign.tokens.issue(&request(user.id.to_string())).unwrap();

        let err = use_case.execute(input(&issued.token, true)).await.unwrap_err();
        assert!(matches!(err, AuthError::TokenInvalid));
    }

    #[tokio::test]
    async fn test_unknown_subject() {
        let (use_case, services, _) = fixture().await;

        let stranger = services.tokens.issue(&request(UserId::new().to_string())).unwrap();
        let err = use_case.execute(input(&stranger.token, false)).await.unwrap_err();
        assert!(matches!(err, AuthError::TokenUserNotFound));

        let garbage = services.tokens.issue(&request("not-an-id".to_string())).unwrap();
        let err = use_case.execute(input(&garbage.token, false)).await.unwrap_err();
        assert!(matches!(err, AuthError::TokenUserNotFound));
    }

    #[tokio::test]
    async fn test_token_without_audience() {
        use jsonwebtoken::{EncodingKey, Header, encode};

        let secret = b"0123456789abcdef0123456789abcdef".to_vec();
        let config = AuthConfig {
            token: platform::token::TokenConfig::new(secret.clone()),
            ..AuthConfig::testing()
        };
        let services = Arc::new(config.build_services().unwrap());
        let repo = Arc::new(DocumentUserRepository::in_memory());
        let use_case = AuthenticateUseCase::new(repo, services);

        let now = now_ms() / 1000;
        let claims = TokenClaims {
            aud: None,
            sub: "User Token".to_string(),
            jti: UserId::new().to_string(),
            iat: now,
            exp: now + 60,
            nonce: String::new(),
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(&secret)).unwrap();

        let err = use_case.execute(input(&token, false)).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingAudience));
    }
}

//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::value_object::user_lookup::UserLookup;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Persist a new user
    ///
    /// Fails with `AuthError::EmailTaken` when the email is already registered.
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find one user by id, email or phone
    async fn find_one(&self, lookup: &UserLookup) -> AuthResult<Option<User>>;

    /// Stamp the last successful login
    async fn record_login(&self, user_id: &UserId, at: DateTime<Utc>) -> AuthResult<()>;
}

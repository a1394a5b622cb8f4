//! Get User Use Case
//!
//! Returns the signed-in principal's own account.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::user_view::UserView;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_lookup::UserLookup;
use crate::error::{AuthError, AuthResult};

pub struct GetUserUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> GetUserUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: UserId) -> AuthResult<UserView> {
        let user = self
            .repo
            .find_one(&UserLookup::Id(user_id))
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(UserView::from(&user))
    }
}

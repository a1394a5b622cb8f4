//! User View
//!
//! The only shape in which a user record leaves the application layer.
//! It has no password field, so a hash cannot leak into a response.

use kernel::id::UserId;
use serde::Serialize;

use crate::domain::entity::user::User;
use crate::domain::value_object::{user_status::UserStatus, user_type::UserType};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: UserId,
    pub name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub photo_url: String,
    pub bio: Option<String>,
    pub status: UserStatus,
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub is_phone_verified: bool,
    /// Unix milliseconds
    pub last_login_at: Option<i64>,
    pub created_by: Option<UserId>,
    pub updated_by: Option<UserId>,
    /// Unix milliseconds
    pub created_at: i64,
    /// Unix milliseconds
    pub updated_at: i64,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.as_ref().map(|n| n.as_str().to_string()),
            email: user.email.as_str().to_string(),
            phone: user.phone.clone(),
            photo_url: user.photo_url.clone(),
            bio: user.bio.clone(),
            status: user.status,
            user_type: user.user_type,
            is_phone_verified: user.is_phone_verified,
            last_login_at: user.last_login_at.map(|t| t.timestamp_millis()),
            created_by: user.created_by,
            updated_by: user.updated_by,
            created_at: user.created_at.timestamp_millis(),
            updated_at: user.updated_at.timestamp_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::email::Email;

    #[test]
    fn test_view_has_no_password() {
        let user = User::new(
            None,
            Email::new("jane@example.com").unwrap(),
            "$argon2id$secret-hash".to_string(),
            Some("5550100".to_string()),
        );
        let json = serde_json::to_value(UserView::from(&user)).unwrap();

        assert!(json.get("password").is_none());
        assert!(!json.to_string().contains("secret-hash"));
        assert_eq!(json["email"], "jane@example.com");
        assert_eq!(json["phone"], "5550100");
        assert_eq!(json["type"], "user");
    }
}

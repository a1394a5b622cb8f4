//! User Entity
//!
//! The stored user record. Field names follow the document layout of the
//! `users` collection (camelCase).

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::domain::value_object::{
    email::Email, user_name::UserName, user_status::UserStatus, user_type::UserType,
};

/// Avatar shown until the user uploads one
pub const DEFAULT_PHOTO_URL: &str = "/assets/default/images/avatar.jpg";

/// User entity
///
/// `password` always holds a PHC hash string. It never leaves the
/// application layer: responses are built from `UserView`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub name: Option<UserName>,
    pub email: Email,
    #[serde(rename = "password")]
    pub password_hash: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default = "default_photo_url")]
    pub photo_url: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(rename = "type", default)]
    pub user_type: UserType,
    #[serde(default)]
    pub is_phone_verified: bool,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub last_login_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_by: Option<UserId>,
    #[serde(default)]
    pub updated_by: Option<UserId>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

fn default_photo_url() -> String {
    DEFAULT_PHOTO_URL.to_string()
}

impl User {
    /// Create a new active account
    pub fn new(
        name: Option<UserName>,
        email: Email,
        password_hash: String,
        phone: Option<String>,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: UserId::new(),
            name,
            email,
            password_hash,
            phone,
            photo_url: default_photo_url(),
            bio: None,
            status: UserStatus::default(),
            user_type: UserType::default(),
            is_phone_verified: false,
            last_login_at: None,
            created_by: None,
            updated_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record successful login
    pub fn record_login(&mut self, at: DateTime<Utc>) {
        self.last_login_at = Some(at);
        self.updated_at = at;
    }
}

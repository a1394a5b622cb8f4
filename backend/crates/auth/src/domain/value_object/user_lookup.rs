//! User Lookup Key
//!
//! Identifies one account by id, else email, else phone: the first
//! non-empty field wins.

use kernel::id::UserId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLookup {
    Id(UserId),
    /// Lower-cased email
    Email(String),
    Phone(String),
}

impl UserLookup {
    /// Pick the lookup key from optional request fields
    ///
    /// Returns `None` when every field is absent or blank. An id that is
    /// not a valid UUID is skipped like an absent one.
    pub fn from_fields(id: Option<&str>, email: Option<&str>, phone: Option<&str>) -> Option<Self> {
        fn non_empty(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|v| !v.is_empty())
        }

        if let Some(id) = non_empty(id).and_then(|v| v.parse::<UserId>().ok()) {
            return Some(Self::Id(id));
        }
        if let Some(email) = non_empty(email) {
            return Some(Self::Email(email.to_lowercase()));
        }
        non_empty(phone).map(|p| Self::Phone(p.to_string()))
    }
}

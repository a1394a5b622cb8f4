//! User Status Value Object
//!
//! Account status as stored on the user record. Only `Active` accounts may
//! sign in; every other status maps to a distinct sign-in rejection.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// User account status
///
/// Stored values outside the known set (including `null` and non-strings)
/// deserialize to [`UserStatus::Unknown`] instead of failing the whole record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserStatus {
    /// Normal active account
    #[default]
    Active,

    /// Locked by an administrator
    Locked,

    /// Email address not yet verified
    NotVerified,

    /// Deleted account (kept for audit)
    Deleted,

    /// Any status this service does not recognise
    Unknown,
}

impl UserStatus {
    /// Get string code for storage/API
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Locked => "Locked",
            Self::NotVerified => "Not_verified",
            Self::Deleted => "Deleted",
            Self::Unknown => "Unknown",
        }
    }

    /// Create from string code; unrecognised codes yield `Unknown`
    pub fn from_code(code: &str) -> Self {
        match code {
            "Active" => Self::Active,
            "Locked" => Self::Locked,
            "Not_verified" => Self::NotVerified,
            "Deleted" => Self::Deleted,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for UserStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for UserStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(code) => Ok(Self::from_code(&code)),
            _ => Ok(Self::Unknown),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(UserStatus::from_code("Active"), UserStatus::Active);
        assert_eq!(UserStatus::from_code("Locked"), UserStatus::Locked);
        assert_eq!(UserStatus::from_code("Not_verified"), UserStatus::NotVerified);
        assert_eq!(UserStatus::from_code("Deleted"), UserStatus::Deleted);
        assert_eq!(UserStatus::from_code("Suspended"), UserStatus::Unknown);
        assert_eq!(UserStatus::from_code("active"), UserStatus::Unknown);
    }

    #[test]
    fn test_non_string_codes_are_unknown() {
        for raw in [serde_json::json!(null), serde_json::json!(3), serde_json::json!({"a": 1})] {
            let parsed: UserStatus = serde_json::from_value(raw.clone()).unwrap();
            assert_eq!(parsed, UserStatus::Unknown, "{raw}");
        }
    }

    #[test]
    fn test_serde_uses_stored_codes() {
        assert_eq!(
            serde_json::to_value(UserStatus::NotVerified).unwrap(),
            serde_json::json!("Not_verified")
        );
        let parsed: UserStatus = serde_json::from_value(serde_json::json!("Archived")).unwrap();
        assert_eq!(parsed, UserStatus::Unknown);
    }

    #[test]
    fn test_default() {
        assert_eq!(UserStatus::default(), UserStatus::Active);
    }
}

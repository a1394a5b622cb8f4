//! User Name Value Object
//!
//! 表示用の氏名。ログイン識別子ではない（ログインはメールアドレス）。
//!
//! ## 不変条件
//! - NFKC 正規化・前後の空白除去後に 1〜70 文字
//! - 使用可能文字: 英数字、空白、ドット（`[A-Za-z0-9. ]`）

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

use crate::error::{AuthError, AuthResult};

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 70;

const NAME_VALIDATION_MSG: &str =
    "Name is either missing or invalid. Only alphabets, numerics, space and dot are allowed.";

/// Display name of an account
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> AuthResult<Self> {
        let normalized: String = raw.as_ref().nfkc().collect::<String>().trim().to_string();

        if normalized.is_empty() || !normalized.chars().all(is_allowed_char) {
            return Err(AuthError::Validation(NAME_VALIDATION_MSG.to_string()));
        }

        if normalized.chars().count() > USER_NAME_MAX_LENGTH {
            return Err(AuthError::Validation(format!(
                "Name must be at most {} characters.",
                USER_NAME_MAX_LENGTH
            )));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == ' '
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

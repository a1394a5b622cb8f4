//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum that maps to envelope / HTTP status codes.

use serde::Serialize;

/// エラー種別の列挙体
///
/// エンベロープの `code` と HTTP ステータスコードに対応するエラー分類を定義します。
/// `InvalidToken` / `AttemptExceeded` / `Locked` / `Unprocessable` は語彙として
/// 予約されており、現在のユースケースからは生成されません。
///
/// ## Notes
/// * `non_exhaustive` - 将来的に列挙子が追加される可能性があることを示す
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::NotFound;
/// assert_eq!(kind.status_code(), 404);
/// assert_eq!(kind.as_str(), "NOT_FOUND");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 400 - 入力が不正・不足している（トークン未指定など）
    BadRequest,
    /// 401 - 認証失敗（資格情報の不一致、無効なトークン）
    NotAuthenticated,
    /// 403 - 認可されていない（メール未確認など）
    NotAuthorized,
    /// 403 - アカウントがロック・削除されている
    Forbidden,
    /// 404 - エンティティが存在しない
    NotFound,
    /// 408 - 永続化層の呼び出しがタイムアウトした
    RequestTimeout,
    /// 409 - 予期しない失敗の汎用フォールバック（重複キーを含む）
    Conflict,
    /// 417 - 予約: 無効なトークン
    InvalidToken,
    /// 422 - 予約: 処理不可能なエンティティ
    Unprocessable,
    /// 423 - 予約: ロックされている
    Locked,
    /// 429 - 予約: 試行回数超過
    AttemptExceeded,
    /// 503 - 永続化層が利用不可
    ServiceUnavailable,
}

impl ErrorKind {
    /// エンベロープ / HTTP ステータスコードを取得
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::BadRequest.status_code(), 400);
    /// assert_eq!(ErrorKind::NotAuthorized.status_code(), 403);
    /// ```
    #[inline]
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::NotAuthenticated => 401,
            ErrorKind::NotAuthorized => 403,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::RequestTimeout => 408,
            ErrorKind::Conflict => 409,
            ErrorKind::InvalidToken => 417,
            ErrorKind::Unprocessable => 422,
            ErrorKind::Locked => 423,
            ErrorKind::AttemptExceeded => 429,
            ErrorKind::ServiceUnavailable => 503,
        }
    }

    /// 定数名としての文字列表現を取得
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::NotAuthenticated.as_str(), "NOT_AUTHENTICATED");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "BAD_REQUEST",
            ErrorKind::NotAuthenticated => "NOT_AUTHENTICATED",
            ErrorKind::NotAuthorized => "NOT_AUTHORIZED",
            ErrorKind::Forbidden => "FORBIDDEN",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::RequestTimeout => "REQUEST_TIMEOUT",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::InvalidToken => "INVALID_TOKEN",
            ErrorKind::Unprocessable => "UNPROCESSABLE",
            ErrorKind::Locked => "LOCKED",
            ErrorKind::AttemptExceeded => "ATTEMPT_EXCEEDED",
            ErrorKind::ServiceUnavailable => "SERVICE_UNAVAILABLE",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorKind::BadRequest.status_code(), 400);
        assert_eq!(ErrorKind::NotAuthenticated.status_code(), 401);
        assert_eq!(ErrorKind::NotAuthorized.status_code(), 403);
        assert_eq!(ErrorKind::Forbidden.status_code(), 403);
        assert_eq!(ErrorKind::NotFound.status_code(), 404);
        assert_eq!(ErrorKind::RequestTimeout.status_code(), 408);
        assert_eq!(ErrorKind::Conflict.status_code(), 409);
        assert_eq!(ErrorKind::InvalidToken.status_code(), 417);
        assert_eq!(ErrorKind::Unprocessable.status_code(), 422);
        assert_eq!(ErrorKind::Locked.status_code(), 423);
        assert_eq!(ErrorKind::AttemptExceeded.status_code(), 429);
        assert_eq!(ErrorKind::ServiceUnavailable.status_code(), 503);
    }

    #[test]
    fn test_display_uses_constant_name() {
        assert_eq!(ErrorKind::Forbidden.to_string(), "FORBIDDEN");
        assert_eq!(ErrorKind::AttemptExceeded.to_string(), "ATTEMPT_EXCEEDED");
    }
}

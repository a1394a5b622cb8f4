//! Application Error - Unified error type for the application
//!
//! Defines the [`AppError`] struct.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use serde_json::Value;

use super::kind::ErrorKind;

/// アプリケーション統一エラー型
///
/// エンベロープの失敗側 `{code, message, data}` に対応する標準エラー型です。
/// ビルダーパターンを使用してエラーを構築できます。
///
/// ## Fields
/// * `kind` - エラーの分類（`code` にマッピング）
/// * `message` - ユーザー向けのエラーメッセージ（常に存在）
/// * `data` - 付随データ（オプション、`null` になり得る唯一のフィールド）
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// // シンプルなエラー
/// let err = AppError::new(ErrorKind::NotFound, "User not found.");
///
/// // データ付きのエラー
/// let err = AppError::new(ErrorKind::Forbidden, "Yours account is locked.")
///     .with_data(serde_json::json!({}));
/// ```
pub struct AppError {
    /// エラー種別
    kind: ErrorKind,
    /// ユーザー向けメッセージ
    message: Cow<'static, str>,
    /// 付随データ
    data: Option<Value>,
}

impl AppError {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// 新しいエラーを作成
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            data: None,
        }
    }

    // ========================================================================
    // Convenience constructors
    // ========================================================================

    /// 401 Not Authenticated エラー
    #[inline]
    pub fn not_authenticated(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotAuthenticated, message)
    }

    /// 404 Not Found エラー
    #[inline]
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// 409 Conflict エラー
    #[inline]
    pub fn conflict(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// 付随データを設定
    #[inline]
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// エラー種別を取得
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// ステータスコードを取得
    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// メッセージを取得
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 付随データを取得
    #[inline]
    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// 付随データを取り出す
    #[inline]
    pub fn take_data(&mut self) -> Option<Value> {
        self.data.take()
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("message", &self.message);
        if let Some(data) = &self.data {
            builder.field("data", data);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_error() {
        let err = AppError::new(ErrorKind::NotFound, "User not found.");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.message(), "User not found.");
        assert!(err.data().is_none());
    }

    #[test]
    fn test_convenience_constructors() {
        assert_eq!(AppError::not_authenticated("test").status_code(), 401);
        assert_eq!(AppError::not_found("test").status_code(), 404);
        assert_eq!(AppError::conflict("test").status_code(), 409);
    }

    #[test]
    fn test_with_data() {
        let mut err = AppError::new(ErrorKind::Forbidden, "locked").with_data(serde_json::json!({}));
        assert_eq!(err.data(), Some(&serde_json::json!({})));
        assert_eq!(err.take_data(), Some(serde_json::json!({})));
        assert!(err.data().is_none());
    }

    #[test]
    fn test_display() {
        let err = AppError::not_found("User not found.");
        assert_eq!(err.to_string(), "[NOT_FOUND] User not found.");
    }
}

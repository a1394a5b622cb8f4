//! Result Envelope
//!
//! Every endpoint answers with the same `{code, message, data}` shape,
//! on the success path and on the failure path alike.

use serde::Serialize;
use serde_json::Value;

use crate::error::app_error::AppError;

/// 成功時のコード
pub const OK_CODE: u16 = 200;

/// 統一レスポンスエンベロープ
///
/// ## Invariants
/// * `code` は常に存在する
/// * `message` は常に人間が読める文字列
/// * `data` のみ `null` になり得る
///
/// ## Examples
/// ```rust
/// use kernel::envelope::Envelope;
///
/// let env = Envelope::ok("Todo details fetched successfully.", 42);
/// assert_eq!(env.code, 200);
/// assert_eq!(env.data, Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T = Value> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// 200 の成功エンベロープ
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            code: OK_CODE,
            message: message.into(),
            data: Some(data),
        }
    }

    /// `data` を持たない 200 エンベロープ
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            code: OK_CODE,
            message: message.into(),
            data: None,
        }
    }
}

impl From<AppError> for Envelope<Value> {
    fn from(mut err: AppError) -> Self {
        let data = err.take_data();
        Self {
            code: err.status_code(),
            message: err.message().to_string(),
            data,
        }
    }
}

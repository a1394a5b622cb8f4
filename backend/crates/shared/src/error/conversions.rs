//! HTTP rendering of [`AppError`] and [`Envelope`]
//!
//! The transport status always mirrors the envelope `code`.

#[cfg(feature = "axum")]
mod http_impls {
    use axum::Json;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use serde::Serialize;

    use crate::envelope::Envelope;
    use crate::error::app_error::AppError;

    /// Envelope code → transport status. Codes are always mirrored.
    fn status_for(code: u16) -> StatusCode {
        StatusCode::from_u16(code).unwrap_or(StatusCode::CONFLICT)
    }

    impl<T: Serialize> IntoResponse for Envelope<T> {
        fn into_response(self) -> Response {
            (status_for(self.code), Json(self)).into_response()
        }
    }

    impl IntoResponse for AppError {
        fn into_response(self) -> Response {
            Envelope::from(self).into_response()
        }
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use serde_json::Value;

    use crate::envelope::Envelope;
    use crate::error::{app_error::AppError, kind::ErrorKind};

    #[test]
    fn test_app_error_status_mirrors_code() {
        let response = AppError::new(ErrorKind::Forbidden, "Yours account is locked.").into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_invalid_code_falls_back_to_conflict() {
        let envelope: Envelope<Value> = Envelope {
            code: 42,
            message: "odd".to_string(),
            data: None,
        };
        assert_eq!(envelope.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_message_only_is_ok() {
        let response = Envelope::<Value>::message_only("User successfully logged out.").into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

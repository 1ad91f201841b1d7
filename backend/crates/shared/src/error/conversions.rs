//! Error conversions
//!
//! Turns [`AppError`] into a plain-text HTTP response (feature `axum`).

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for super::app_error::AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::{StatusCode, header};

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.public_message(),
        )
            .into_response()
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use crate::error::app_error::{AppError, GENERIC_SERVER_MESSAGE};
    use crate::error::kind::ErrorKind;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn test_status_is_preserved() {
        let response = AppError::new(ErrorKind::Conflict, "User already exists").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_server_error_body_is_generic() {
        let response = AppError::new(
            ErrorKind::ServiceUnavailable,
            "connection to 10.0.0.5:5432 refused",
        )
        .into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body_text(response).await, GENERIC_SERVER_MESSAGE);
    }

    #[tokio::test]
    async fn test_client_error_body_is_message() {
        let response = AppError::new(ErrorKind::Conflict, "User already exists").into_response();
        assert_eq!(body_text(response).await, "User already exists");
    }
}

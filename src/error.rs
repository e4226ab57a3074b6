use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::handlers::shared::MessageResponse;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The HTTP method is not served by the endpoint.
    #[error("Wrong request")]
    WrongRequest,

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Not implemented")]
    NotImplemented,

    #[error("Internal server error{}", .0.as_ref().map_or("".to_string(), |s| format!(": {}", s)))]
    InternalServerError(Option<String>),
}

impl AppError {
    pub fn internal_server_error() -> Self {
        AppError::InternalServerError(None)
    }

    /// Text sent to the client. Database and internal failures are reduced to
    /// a fixed message; their detail only goes to the log.
    pub fn client_message(&self) -> String {
        match self {
            AppError::BadRequest(detail) => format!("BAD REQUEST (400): {}", detail),
            AppError::WrongRequest => "WRONG REQUEST (400)".to_string(),
            AppError::NotFound(detail) => format!("NOT FOUND (404): {}", detail),
            AppError::Unauthorized => "UNAUTHORIZED (401)".to_string(),
            AppError::NotImplemented => "NOT IMPLEMENTED (501)".to_string(),
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => {
                "INTERNAL ERROR (500)".to_string()
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::WrongRequest => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::NotImplemented => StatusCode::NOT_IMPLEMENTED,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            log::error!("Request failed with status {}: {}", status_code, self);
        } else {
            log::warn!("Request failed with status {}: {}", status_code, self);
        }

        HttpResponse::build(status_code).json(MessageResponse::new(self.client_message()))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        log::error!("Database error: {}", error);
        AppError::DatabaseError(error)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        log::error!("Anyhow error: {}", error);

        // Repository errors arrive wrapped in anyhow; keep the structured variant
        match error.downcast::<AppError>() {
            Ok(app_err) => app_err,
            Err(error) => match error.downcast::<sqlx::Error>() {
                Ok(sqlx_err) => AppError::DatabaseError(sqlx_err),
                Err(original_error) => {
                    AppError::InternalServerError(Some(original_error.to_string()))
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use pretty_assertions::assert_eq;

    #[test]
    fn statuses_match_taxonomy() {
        assert_eq!(
            AppError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::WrongRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::internal_server_error().status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_detail_is_not_sent_to_client() {
        let err = AppError::InternalServerError(Some("pool exhausted at 10.0.0.3".into()));
        assert_eq!(err.client_message(), "INTERNAL ERROR (500)");
    }

    #[actix_rt::test]
    async fn wrong_request_body_keeps_message_shape() {
        let resp = AppError::WrongRequest.error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "Message": "WRONG REQUEST (400)" }));
    }

    #[test]
    fn anyhow_wrapping_keeps_app_error() {
        let err: AppError = anyhow::Error::new(AppError::NotFound("user 3".into())).into();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "user 3"));
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use leafy_core::LinkError;
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    /// The request body could not be decoded.
    InvalidRequest,
    Link(LinkError),
}

impl From<LinkError> for AppError {
    fn from(value: LinkError) -> Self {
        Self::Link(value)
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest => StatusCode::BAD_REQUEST,
            AppError::Link(err) => match err {
                LinkError::MissingUrl
                | LinkError::InvalidCode(_)
                | LinkError::CodeTaken(_)
                | LinkError::ReservedCode(_) => StatusCode::BAD_REQUEST,
                err if err.is_timeout() => StatusCode::SERVICE_UNAVAILABLE,
                LinkError::GenerationExhausted { .. } | LinkError::StorageUnavailable(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::InvalidRequest => "Invalid request".to_string(),
            AppError::Link(LinkError::MissingUrl) => "URL is required".to_string(),
            AppError::Link(LinkError::CodeTaken(_)) => "Shortcode already exists".to_string(),
            AppError::Link(LinkError::ReservedCode(code)) => {
                format!("Shortcode is reserved: {code}")
            }
            AppError::Link(err @ LinkError::InvalidCode(_)) => err.to_string(),
            AppError::Link(err) if err.is_timeout() => "Storage timed out".to_string(),
            AppError::Link(LinkError::GenerationExhausted { .. }) => {
                "Could not generate a shortcode".to_string()
            }
            AppError::Link(LinkError::StorageUnavailable(_)) => "Server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = ?self, "request failed");
        }

        let body = ErrorResponse {
            error: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leafy_core::StorageError;

    #[test]
    fn client_errors() {
        assert_eq!(
            AppError::from(LinkError::MissingUrl).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(LinkError::CodeTaken("abc".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(LinkError::InvalidCode("a/b".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(LinkError::ReservedCode("health".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::InvalidRequest.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn server_errors() {
        assert_eq!(
            AppError::from(LinkError::GenerationExhausted { attempts: 5 }).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(LinkError::from(StorageError::Unavailable("down".into()))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(LinkError::from(StorageError::Timeout("slow".into()))).status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn storage_details_are_not_exposed() {
        let err = AppError::from(LinkError::from(StorageError::Unavailable(
            "/var/lib/leafy/links.json: permission denied".into(),
        )));
        assert_eq!(err.message(), "Server error");
    }
}

use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::identity::IdentityError;
use crate::tutorial::TutorialError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Tutorial(#[from] TutorialError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Internal server error")]
    InternalServerError,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut code = None;
        let (status, error_message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not Found".to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::Identity(e) => {
                code = Some(e.code());
                let status = match &e {
                    IdentityError::MissingCredentials | IdentityError::InvalidEmail => {
                        StatusCode::BAD_REQUEST
                    }
                    IdentityError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
                    IdentityError::UserDisabled => StatusCode::FORBIDDEN,
                    IdentityError::Provider(detail) => {
                        error!("identity provider error: {}", detail);
                        StatusCode::BAD_GATEWAY
                    }
                    IdentityError::UserNotFound | IdentityError::WrongPassword => {
                        StatusCode::UNAUTHORIZED
                    }
                };
                (status, e.to_string())
            }
            AppError::Tutorial(e) => {
                let status = match &e {
                    TutorialError::NoQuiz | TutorialError::UnknownChapter(_) => StatusCode::NOT_FOUND,
                    _ => StatusCode::BAD_REQUEST,
                };
                (status, e.to_string())
            }
            AppError::Catalog(e) => {
                error!("catalog error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Catalog unavailable".to_string(),
                )
            }
            AppError::Config(e) => {
                error!("configuration error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message: error_message,
            code,
        });

        (status, body).into_response()
    }
}

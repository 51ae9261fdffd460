use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Sqlx failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Api error: {1}")]
    Api(StatusCode, String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ServerError::Sqlx(e) => {
                error!("Sqlx failed with error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    String::from("Database unavailable"),
                )
            }
            ServerError::Api(sc, msg) => {
                error!("Api error: {} - {}", sc, msg);
                (sc, msg)
            }
            ServerError::NotFound(e) => {
                warn!("Entity not found: {}", e);
                (StatusCode::NOT_FOUND, e)
            }
            ServerError::Conflict(e) => {
                warn!("Conflict: {}", e);
                (StatusCode::CONFLICT, e)
            }
            ServerError::Validation(e) => {
                warn!("Validation error: {}", e);
                (StatusCode::BAD_REQUEST, e)
            }
        };

        (
            status,
            Json(json!({ "success": false, "error": message })),
        )
            .into_response()
    }
}

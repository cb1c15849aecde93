use crate::pipe::PipeError;
use axum::Json;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CrudError>;

#[derive(Debug, Error)]
pub enum CrudError {
    #[error("Entity not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Pipe(#[from] PipeError),

    #[error("Interceptor error: {0}")]
    Interceptor(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for CrudError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            CrudError::NotFound => axum::http::StatusCode::NOT_FOUND,
            CrudError::BadRequest(_) => axum::http::StatusCode::BAD_REQUEST,
            CrudError::Pipe(PipeError::Validation(_)) => axum::http::StatusCode::BAD_REQUEST,
            CrudError::Pipe(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            CrudError::Interceptor(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            CrudError::Internal(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(json!({
                "statusCode": status.as_u16(),
                "message": self.to_string(),
            })),
        )
            .into_response()
    }
}

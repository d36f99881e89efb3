use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Todo not found: {0}")]
    TodoNotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Update build error: {0}")]
    Update(#[from] weft_core::UpdateError),

    #[error("Fragment resolution error: {0}")]
    Resolve(#[from] weft_render::ResolveError),

    #[error("Render error: {0}")]
    Render(#[from] weft_render::RenderError),

    #[error("Push delivery error: {0}")]
    Push(#[from] weft_push::SinkError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::TodoNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::BadRequest(_) | ApiError::Update(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::Resolve(ref e) => {
                tracing::error!("Fragment resolution error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Rendering error".to_string())
            }
            ApiError::Render(ref e) => {
                tracing::error!("Render error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Rendering error".to_string())
            }
            ApiError::Push(ref e) => {
                tracing::error!("Push delivery error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Delivery error".to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use conventions_core::DecodeError;

#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    #[error("failed to apply conventions: {0}")]
    Convention(#[from] DecodeError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

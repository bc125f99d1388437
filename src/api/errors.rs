use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug)]
pub enum APIErrors {
    Unauthorized,
    InternalServerError,
}

impl std::error::Error for APIErrors {}

impl std::fmt::Display for APIErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            APIErrors::Unauthorized => write!(f, "Unauthorized"),
            APIErrors::InternalServerError => write!(f, "Internal server error"),
        }
    }
}

impl IntoResponse for APIErrors {
    fn into_response(self) -> Response {
        match self {
            APIErrors::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized").into_response(),
            APIErrors::InternalServerError => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

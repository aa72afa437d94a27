use actix_web::{
    http::{header::ContentType, StatusCode},
    HttpResponse, ResponseError,
};
use thiserror::Error;

use crate::config::ConfigError;

/// Failures reported to a single HTTP caller.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request payload: {0}")]
    MalformedPayload(String),

    // The in-memory append has already happened when this is raised
    #[error("Failed to save review to the database")]
    Persistence(#[from] rusqlite::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::plaintext())
            .body(self.to_string())
    }
}

/// Failures that stop the service from starting or serving.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database initialization failed: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_payload_is_bad_request() {
        let err = ApiError::MalformedPayload("expected value at line 1 column 1".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().starts_with("Invalid request payload"));
    }

    #[test]
    fn test_persistence_is_internal_error() {
        let err = ApiError::from(rusqlite::Error::InvalidQuery);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to save review to the database");
    }

    #[test]
    fn test_error_body_is_plain_text() {
        let response = ApiError::MalformedPayload("eof".into()).error_response();
        let content_type = response
            .headers()
            .get(actix_web::http::header::CONTENT_TYPE)
            .unwrap();
        assert!(content_type.to_str().unwrap().starts_with("text/plain"));
    }
}

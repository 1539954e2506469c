use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug)]
pub enum AppError {
    ConfigError(String),
    NetworkError(String),
    ParseError(String),
    InvalidReference(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::InvalidReference(msg) => write!(f, "Invalid resource reference: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::ParseError(err.to_string())
        } else {
            AppError::NetworkError(err.to_string())
        }
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

// The error state a screen ends up in. One per screen, never partial data.
#[derive(Debug)]
pub enum LoadFailure {
    ListLoadFailed(AppError),
    DetailLoadFailed(AppError),
}

impl LoadFailure {
    pub fn label(&self) -> &'static str {
        match self {
            LoadFailure::ListLoadFailed(_) => "list load failed",
            LoadFailure::DetailLoadFailed(_) => "detail load failed",
        }
    }

    pub fn cause(&self) -> &AppError {
        match self {
            LoadFailure::ListLoadFailed(e) | LoadFailure::DetailLoadFailed(e) => e,
        }
    }
}

impl std::fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label(), self.cause())
    }
}

impl std::error::Error for LoadFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.cause())
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub reason: String,
}

impl From<&LoadFailure> for ErrorBody {
    fn from(failure: &LoadFailure) -> Self {
        Self {
            error: failure.label(),
            reason: failure.cause().to_string(),
        }
    }
}

impl IntoResponse for LoadFailure {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);
        (StatusCode::BAD_GATEWAY, Json(ErrorBody::from(&self))).into_response()
    }
}

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Rejected request body ({0}): {1}")]
    RejectedBody(StatusCode, String),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("Not implemented: {0}")]
    Unimplemented(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::RejectedBody(rejection.status(), rejection.body_text())
    }
}

impl AppError {
    /// HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::RejectedBody(status, _) => *status,
            AppError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Unimplemented(_) => StatusCode::NOT_IMPLEMENTED,
            AppError::HttpClient(_)
            | AppError::ExternalApi(_)
            | AppError::Catalog(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to hand back to a caller.
    ///
    /// Raw upstream and internal detail is only ever logged.
    pub fn public_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg)
            | AppError::RejectedBody(_, msg)
            | AppError::ExternalApi(msg)
            | AppError::NotConfigured(msg)
            | AppError::Unimplemented(msg) => msg.clone(),
            AppError::HttpClient(_) => "Upstream request failed".to_string(),
            AppError::Catalog(_) | AppError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::InvalidInput(_) | AppError::RejectedBody(..) => {
                tracing::info!(error = %self, "Rejected request")
            }
            _ if status.is_server_error() => tracing::error!(error = %self, "Request failed"),
            _ => tracing::warn!(error = %self, "Request failed"),
        }

        let body = Json(json!({
            "success": false,
            "error": self.public_message()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

/// Marker attached to responses produced when the backend rejected the
/// session token. The session guard turns it into a cookie-clearing redirect.
#[derive(Debug, Clone, Copy)]
pub struct SessionDenied;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Backend unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Session rejected by backend")]
    Denied,

    #[error("Backend error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Message suitable for a user-facing notice, falling back to `fallback`
    /// when the failure carries nothing the user should see.
    pub fn notice_or(&self, fallback: &str) -> String {
        match self {
            AppError::Api { message, .. } if !message.is_empty() => message.clone(),
            AppError::Transport(_) => "An error occurred. Please try again.".to_string(),
            _ => fallback.to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorPage<'a> {
    title: &'a str,
    message: &'a str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Denied => {
                let mut response = StatusCode::FORBIDDEN.into_response();
                response.extensions_mut().insert(SessionDenied);
                return response;
            }
            AppError::Api { status, message } => {
                tracing::warn!("Backend returned {status}: {message}");
                (StatusCode::BAD_GATEWAY, message.clone())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Transport(e) => {
                tracing::error!("Backend transport error: {e}");
                (StatusCode::BAD_GATEWAY, "Error loading data".to_string())
            }
            AppError::Decode(e) => {
                tracing::error!("Backend decode error: {e}");
                (StatusCode::BAD_GATEWAY, "Error loading data".to_string())
            }
            AppError::Template(e) => {
                tracing::error!("Template error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let page = ErrorPage {
            title: status.canonical_reason().unwrap_or("Error"),
            message: &message,
        };
        match page.render() {
            Ok(body) => (status, Html(body)).into_response(),
            Err(_) => (status, message).into_response(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

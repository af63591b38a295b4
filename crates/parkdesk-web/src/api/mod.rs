//! Typed client for the booking backend's REST API.
//!
//! Every call is a single request: no retries, no timeout, no cancellation.
//! Authorization failures on authenticated calls surface as
//! [`AppError::Denied`] so the session guard can drop the session.

mod account;
mod admin;
mod bookings;

pub use account::{ProfileUpdate, Registration};

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Acknowledgement returned by state-changing endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// JSON `{}` for endpoints that take no body.
#[derive(Debug, Serialize)]
struct Empty {}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> AppResult<Self> {
        let http = Client::builder()
            .user_agent("parkdesk-web/0.1")
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{path}", self.base_url)
    }

    async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&B>,
    ) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let mut req = self
            .http
            .request(method.clone(), &url)
            .header("Accept", "application/json");
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(|e| {
            tracing::error!("{method} {path} failed: {e}");
            AppError::Transport(e)
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Self::failure(&method, path, status, token.is_some(), resp).await);
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!("{method} {path} returned an unexpected body: {e}");
            AppError::Decode(format!("{path}: {e}"))
        })
    }

    async fn failure(
        method: &Method,
        path: &str,
        status: StatusCode,
        authenticated: bool,
        resp: reqwest::Response,
    ) -> AppError {
        if authenticated
            && (status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN)
        {
            tracing::warn!("{method} {path} denied with {status}, dropping session");
            return AppError::Denied;
        }

        let text = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|b| b.error.or(b.message))
            .unwrap_or_default();
        tracing::warn!("{method} {path} returned {status}: {message}");

        AppError::Api {
            status: status.as_u16(),
            message,
        }
    }

    async fn get<T: DeserializeOwned>(&self, token: &str, path: &str) -> AppResult<T> {
        self.request::<(), T>(Method::GET, path, Some(token), None)
            .await
    }

    async fn send<B, T>(&self, method: Method, token: &str, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(method, path, Some(token), Some(body)).await
    }
}

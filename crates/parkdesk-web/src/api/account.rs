use reqwest::Method;
use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use super::ApiClient;
use crate::error::{AppError, AppResult};
use crate::models::User;

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub vehicle_number: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub vehicle_number: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "access_token")]
    pub token: String,
    #[serde(default)]
    pub user: User,
}

impl ApiClient {
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        self.request(
            Method::POST,
            "/auth/login",
            None,
            Some(&Credentials { email, password }),
        )
        .await
    }

    pub async fn register(&self, registration: &Registration) -> AppResult<()> {
        let _: IgnoredAny = self
            .request(Method::POST, "/auth/register", None, Some(registration))
            .await?;
        Ok(())
    }

    /// Returns the updated profile as stored by the backend.
    pub async fn update_profile(&self, token: &str, update: &ProfileUpdate) -> AppResult<User> {
        let value: serde_json::Value = self
            .send(Method::PUT, token, "/users/profile", update)
            .await?;

        // Some deployments wrap the profile in {"user": ...}.
        let user = match value.get("user") {
            Some(inner) if inner.is_object() => inner.clone(),
            _ => value,
        };
        serde_json::from_value(user).map_err(|e| AppError::Decode(format!("/users/profile: {e}")))
    }
}

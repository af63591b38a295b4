use std::env;

use chrono::FixedOffset;

/// India Standard Time, the zone the backend stores wall-clock times in.
const DEFAULT_BACKEND_UTC_OFFSET: &str = "+05:30";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    /// Base URL of the booking backend, without the `/api` suffix.
    pub api_base_url: String,
    pub cors_origin: String,
    pub secure_cookies: bool,
    pub rate_limit_auth: bool,
    pub app_url: String,
    /// Zone for backend timestamps that carry no offset.
    pub backend_utc_offset: FixedOffset,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "4000".to_string())
                .parse()
                .expect("SERVER_PORT must be a valid port number"),
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string())
                .trim_end_matches('/')
                .to_string(),
            cors_origin: env::var("CORS_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            secure_cookies: env::var("SECURE_COOKIES")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
            rate_limit_auth: env::var("RATE_LIMIT_AUTH")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .unwrap_or(true),
            app_url: env::var("APP_URL")
                .unwrap_or_else(|_| "http://localhost:4000".to_string()),
            backend_utc_offset: env::var("BACKEND_UTC_OFFSET")
                .unwrap_or_else(|_| DEFAULT_BACKEND_UTC_OFFSET.to_string())
                .parse()
                .expect("BACKEND_UTC_OFFSET must be an offset like +05:30"),
        }
    }

    /// Configuration pointing at an arbitrary backend, used by tests.
    #[cfg(test)]
    pub fn for_backend(api_base_url: &str) -> Self {
        Self {
            server_port: 0,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            cors_origin: "http://localhost:3000".to_string(),
            secure_cookies: false,
            rate_limit_auth: false,
            app_url: "http://localhost:4000".to_string(),
            backend_utc_offset: DEFAULT_BACKEND_UTC_OFFSET
                .parse()
                .expect("default offset parses"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_backend_offset_is_ist() {
        let config = Config::for_backend("http://localhost:5000/");
        assert_eq!(config.backend_utc_offset.local_minus_utc(), 5 * 3600 + 1800);
        assert_eq!(config.api_base_url, "http://localhost:5000");
    }
}

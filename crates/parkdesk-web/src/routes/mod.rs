mod admin;
mod dashboard;
mod public;


use std::future::Future;
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, MethodRouter},
    Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::services::ServeDir;

use crate::api::ApiClient;
use crate::auth::{require_admin, require_user};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::state::{SessionRegistry, SnapshotCell};
use crate::views::error_placeholder;
use crate::views::expiry::Clock;

#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub config: Config,
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new(api: ApiClient, config: Config) -> Self {
        Self {
            api,
            config,
            sessions: Arc::new(SessionRegistry::default()),
        }
    }

    /// The current instant, read against the backend's zone.
    pub fn clock(&self) -> Clock {
        Clock::new(self.config.backend_utc_offset)
    }
}

async fn health() -> &'static str {
    "ok"
}

pub fn create_router(state: AppState) -> Router {
    let health_routes = Router::new().route("/health", get(health));

    // 10 sign-in attempts per minute per IP
    let auth_governor = state.config.rate_limit_auth.then(|| {
        Arc::new(
            GovernorConfigBuilder::default()
                .per_second(6)
                .burst_size(10)
                .finish()
                .expect("valid governor configuration"),
        )
    });
    let limited = |route: MethodRouter<AppState>| match &auth_governor {
        Some(config) => route.layer(GovernorLayer::new(config.clone())),
        None => route,
    };

    // Only the credential POSTs count against the quota
    let auth_routes = Router::new()
        .route("/login", limited(post(public::login)))
        .route("/register", limited(post(public::register)))
        .route(
            "/secret-admin-panel",
            get(public::admin_login_page).merge(limited(post(public::admin_login))),
        );

    let public_routes = Router::new()
        .route("/", get(public::index))
        .route("/contact", post(public::contact))
        .route("/logout", get(public::logout))
        .route("/admin/logout", get(public::admin_logout))
        .nest_service("/static", ServeDir::new(static_dir()));

    let admin_routes = Router::new()
        .route("/admin", get(admin::console))
        .route("/admin/parking/{id}", get(admin::parking_detail))
        .route(
            "/admin/parking/{id}/approve",
            get(admin::confirm_approve).post(admin::approve),
        )
        .route(
            "/admin/parking/{id}/reject",
            get(admin::confirm_reject).post(admin::reject),
        )
        .route("/admin/users/{id}", get(admin::user_detail))
        .route(
            "/admin/users/{id}/toggle-status",
            get(admin::confirm_toggle).post(admin::toggle_status),
        )
        .route("/admin/bookings/{id}", get(admin::booking_detail))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let dashboard_routes = Router::new()
        .route("/dashboard", get(dashboard::page))
        .route("/dashboard/select/{slot_id}", post(dashboard::select_slot))
        .route("/dashboard/summary", post(dashboard::update_summary))
        .route("/dashboard/book", post(dashboard::book))
        .route(
            "/dashboard/bookings/{id}/cancel",
            get(dashboard::confirm_cancel).post(dashboard::cancel),
        )
        .route("/dashboard/profile", post(dashboard::update_profile))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    Router::new()
        .merge(health_routes)
        .merge(auth_routes)
        .merge(public_routes)
        .merge(admin_routes)
        .merge(dashboard_routes)
        .with_state(state)
}

fn static_dir() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("static")
}

/// Whether a page should refetch its snapshots or render from what it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Load {
    Refresh,
    Reuse,
}

impl Load {
    fn from_keep(keep: bool) -> Self {
        if keep {
            Load::Reuse
        } else {
            Load::Refresh
        }
    }
}

async fn load<T, F>(cell: &SnapshotCell<T>, resource: &str, mode: Load, fetch: F) -> AppResult<Arc<T>>
where
    F: Future<Output = AppResult<T>>,
{
    match mode {
        Load::Refresh => cell.refresh(resource, fetch).await,
        Load::Reuse => cell.get_or_refresh(resource, fetch).await,
    }
}

/// Turns a failed container render into its placeholder. A rejected session
/// still aborts the whole page.
fn panel_or_placeholder(result: AppResult<String>, message: &str) -> AppResult<String> {
    match result {
        Ok(html) => Ok(html),
        Err(AppError::Denied) => Err(AppError::Denied),
        Err(e) => {
            tracing::error!("{message}: {e}");
            error_placeholder(message)
        }
    }
}

/// Backend identifiers are interpolated into request paths, so only the
/// characters real ids use are accepted.
fn valid_id(id: &str) -> AppResult<&str> {
    if !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        Ok(id)
    } else {
        Err(AppError::NotFound(format!("No record with id {id:?}")))
    }
}

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use super::{load, panel_or_placeholder, valid_id, Load};
use crate::api::Ack;
use crate::auth::{session, AdminSession};
use crate::error::{AppError, AppResult};
use crate::routes::AppState;
use crate::views::admin::{
    bookings_table, pending_table, spaces_table, tab_links, users_table, AdminTab,
    BookingDetailView, ConsolePage, SpaceDetail, StatsView, UserDetailView,
};
use crate::views::{render, ConfirmDialog};

#[derive(Debug, Default, Deserialize)]
pub struct ConsoleQuery {
    pub tab: Option<String>,
    pub keep: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RejectForm {
    #[serde(default)]
    pub reason: String,
}

fn tab_of(query: &ConsoleQuery, default: AdminTab) -> AdminTab {
    query
        .tab
        .as_deref()
        .map(AdminTab::from_key)
        .unwrap_or(default)
}

/// Assembles the console: summary counts plus the active tab's table.
/// Each container degrades to its own placeholder when its fetch fails.
async fn console_page(
    state: &AppState,
    admin: &AdminSession,
    tab: AdminTab,
    mode: Load,
    overlay: Option<String>,
    notice: Option<String>,
) -> AppResult<ConsolePage> {
    let token = admin.token.as_str();
    let cells = &admin.state;

    let stats = match load(&cells.stats, "dashboard stats", mode, state.api.dashboard_stats(token)).await {
        Ok(stats) => StatsView::from(stats.as_ref()),
        Err(AppError::Denied) => return Err(AppError::Denied),
        Err(e) => {
            tracing::error!("Error loading dashboard stats: {e}");
            StatsView::unavailable()
        }
    };

    let clock = state.clock();
    let panel = match tab {
        AdminTab::Pending => {
            let result = load(&cells.pending, "pending spaces", mode, state.api.pending_spaces(token))
                .await
                .and_then(|spaces| pending_table(&spaces, clock));
            panel_or_placeholder(result, "Error loading data")?
        }
        AdminTab::AllParking => {
            let result = load(&cells.spaces, "parking spaces", mode, state.api.all_spaces(token))
                .await
                .and_then(|spaces| spaces_table(&spaces, clock));
            panel_or_placeholder(result, "Error loading data")?
        }
        AdminTab::Users => {
            let result = load(&cells.users, "users", mode, state.api.users(token))
                .await
                .and_then(|users| users_table(&users, clock.zone));
            panel_or_placeholder(result, "Error loading data")?
        }
        AdminTab::Bookings => {
            let result = load(&cells.bookings, "bookings", mode, state.api.admin_bookings(token))
                .await
                .and_then(|bookings| bookings_table(&bookings));
            panel_or_placeholder(result, "Error loading data")?
        }
    };

    Ok(ConsolePage {
        stats,
        tab: tab.key(),
        tabs: tab_links(tab),
        panel,
        overlay,
        notice,
    })
}

pub async fn console(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminSession>,
    jar: CookieJar,
    Query(query): Query<ConsoleQuery>,
) -> AppResult<Response> {
    let tab = tab_of(&query, AdminTab::Pending);
    let (jar, notice) = session::take_flash(jar);
    let mode = Load::from_keep(query.keep.is_some());
    let page = console_page(&state, &admin, tab, mode, None, notice).await?;
    Ok((jar, render(&page)?).into_response())
}

/// Renders the console from its current snapshots with `detail` as overlay.
async fn with_overlay(
    state: &AppState,
    admin: &AdminSession,
    tab: AdminTab,
    detail: AppResult<String>,
) -> AppResult<Response> {
    let (overlay, notice) = match detail {
        Ok(html) => (Some(html), None),
        Err(AppError::Denied) => return Err(AppError::Denied),
        Err(e) => {
            tracing::error!("Failed to load details: {e}");
            (None, Some("Failed to load details".to_string()))
        }
    };
    let page = console_page(state, admin, tab, Load::Reuse, overlay, notice).await?;
    Ok(render(&page)?.into_response())
}

// Detail overlays

pub async fn parking_detail(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminSession>,
    Path(id): Path<String>,
    Query(query): Query<ConsoleQuery>,
) -> AppResult<Response> {
    let id = valid_id(&id)?;
    let tab = tab_of(&query, AdminTab::Pending);
    let detail = state
        .api
        .parking_detail(&admin.token, id)
        .await
        .and_then(|detail| Ok(render(&SpaceDetail::new(&detail, state.clock()))?.0));
    with_overlay(&state, &admin, tab, detail).await
}

pub async fn user_detail(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminSession>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = valid_id(&id)?;
    let detail = state
        .api
        .user_detail(&admin.token, id)
        .await
        .and_then(|detail| Ok(render(&UserDetailView::new(&detail, state.clock().zone))?.0));
    with_overlay(&state, &admin, AdminTab::Users, detail).await
}

pub async fn booking_detail(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminSession>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = valid_id(&id)?;
    let detail = state
        .api
        .admin_booking(&admin.token, id)
        .await
        .and_then(|booking| Ok(render(&BookingDetailView::new(&booking, state.clock().zone))?.0));
    with_overlay(&state, &admin, AdminTab::Bookings, detail).await
}

// Confirmation gates

async fn confirm(
    state: &AppState,
    admin: &AdminSession,
    tab: AdminTab,
    dialog: ConfirmDialog<'_>,
) -> AppResult<Response> {
    let overlay = dialog.to_html()?;
    let page = console_page(state, admin, tab, Load::Reuse, Some(overlay), None).await?;
    Ok(render(&page)?.into_response())
}

pub async fn confirm_approve(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminSession>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = valid_id(&id)?;
    let dialog = ConfirmDialog {
        message: "Approve this parking space?",
        action: format!("/admin/parking/{id}/approve"),
        confirm_label: "Approve",
        with_reason: false,
    };
    confirm(&state, &admin, AdminTab::Pending, dialog).await
}

pub async fn confirm_reject(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminSession>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = valid_id(&id)?;
    let dialog = ConfirmDialog {
        message: "Reject this parking space?",
        action: format!("/admin/parking/{id}/reject"),
        confirm_label: "Reject",
        with_reason: true,
    };
    confirm(&state, &admin, AdminTab::Pending, dialog).await
}

pub async fn confirm_toggle(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminSession>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = valid_id(&id)?;
    let dialog = ConfirmDialog {
        message: "Change this user's status?",
        action: format!("/admin/users/{id}/toggle-status"),
        confirm_label: "Confirm",
        with_reason: false,
    };
    confirm(&state, &admin, AdminTab::Users, dialog).await
}

// Actions

/// Success flashes and reloads the tab, which refreshes both the list and
/// the summary counts. Failure flashes and re-renders from held snapshots.
fn after_action(
    jar: CookieJar,
    tab: AdminTab,
    result: AppResult<Ack>,
    success: &str,
    failure: &str,
) -> AppResult<Response> {
    match result {
        Ok(ack) => {
            let message = ack.message.unwrap_or_else(|| success.to_string());
            let jar = session::flash(jar, &message);
            let to = format!("/admin?tab={}", tab.key());
            Ok((jar, Redirect::to(&to)).into_response())
        }
        Err(AppError::Denied) => Err(AppError::Denied),
        Err(e) => {
            tracing::warn!("{failure}: {e}");
            let jar = session::flash(jar, &e.notice_or(failure));
            let to = format!("/admin?tab={}&keep=1", tab.key());
            Ok((jar, Redirect::to(&to)).into_response())
        }
    }
}

pub async fn approve(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminSession>,
    jar: CookieJar,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = valid_id(&id)?;
    let result = state.api.approve_space(&admin.token, id).await;
    if result.is_ok() {
        tracing::info!("Approved parking space {id}");
    }
    after_action(
        jar,
        AdminTab::Pending,
        result,
        "Parking space approved successfully",
        "Error approving parking space",
    )
}

pub async fn reject(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminSession>,
    jar: CookieJar,
    Path(id): Path<String>,
    Form(form): Form<RejectForm>,
) -> AppResult<Response> {
    let id = valid_id(&id)?;
    let result = state
        .api
        .reject_space(&admin.token, id, &form.reason)
        .await;
    if result.is_ok() {
        tracing::info!("Rejected parking space {id}");
    }
    after_action(
        jar,
        AdminTab::Pending,
        result,
        "Parking space rejected",
        "Error rejecting parking space",
    )
}

pub async fn toggle_status(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminSession>,
    jar: CookieJar,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = valid_id(&id)?;
    let result = state.api.toggle_user_status(&admin.token, id).await;
    if let Ok(ack) = &result {
        tracing::info!("Toggled user {id}, active now {:?}", ack.is_active);
    }
    after_action(
        jar,
        AdminTab::Users,
        result,
        "User status updated",
        "Error updating user status",
    )
}

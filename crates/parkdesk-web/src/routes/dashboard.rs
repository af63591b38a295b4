use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use super::{load, panel_or_placeholder, valid_id, Load};
use crate::api::ProfileUpdate;
use crate::auth::session::{self, Realm};
use crate::auth::UserSession;
use crate::error::{AppError, AppResult};
use crate::routes::AppState;
use crate::state::{parse_duration, SelectedSlot, Selection};
use crate::views::dashboard::{
    booking_cards, slot_grid, type_options, BookSection, BookingsSection, DashboardPage,
    DashboardSection, Overview, ProfileSection,
};
use crate::views::filter::{BookingFilter, SlotFilter};
use crate::views::format::format_amount;
use crate::views::{render, ConfirmDialog};

const BOOK_VIEW: &str = "/dashboard?section=book&keep=1";

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub section: Option<String>,
    #[serde(rename = "type")]
    pub slot_type: Option<String>,
    pub filter: Option<String>,
    pub keep: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DurationForm {
    #[serde(default)]
    pub duration: String,
}

fn user_name(user: &UserSession) -> String {
    user.profile.display_name().to_string()
}

/// Renders one dashboard section. `mode` decides whether its snapshots are
/// refetched or reused; filters always come from the session state.
async fn section_content(
    state: &AppState,
    user: &UserSession,
    section: DashboardSection,
    mode: Load,
) -> AppResult<String> {
    let token = user.token.as_str();
    let cells = &user.state;

    match section {
        DashboardSection::Overview => {
            let slots = load(&cells.slots, "slots", mode, state.api.slots(token)).await;
            let bookings = load(&cells.bookings, "bookings", mode, state.api.my_bookings(token)).await;
            let slots = match slots {
                Ok(s) => Some(s),
                Err(AppError::Denied) => return Err(AppError::Denied),
                Err(e) => {
                    tracing::error!("Error loading slots: {e}");
                    None
                }
            };
            let bookings = match bookings {
                Ok(b) => Some(b),
                Err(AppError::Denied) => return Err(AppError::Denied),
                Err(e) => {
                    tracing::error!("Error loading bookings: {e}");
                    None
                }
            };
            let view = Overview::new(
                slots.as_deref().map(Vec::as_slice),
                bookings.as_deref().map(Vec::as_slice),
            );
            Ok(render(&view)?.0)
        }
        DashboardSection::Book => {
            let filter = cells.slot_filter();
            let slots = load(&cells.slots, "slots", mode, state.api.slots(token)).await;
            let selection = cells.selection().clone();
            let selected_id = selection.slot.as_ref().map(|s| s.id.as_str());

            let (types, grid) = match slots {
                Ok(slots) => (
                    type_options(&slots, &filter),
                    slot_grid(&slots, &filter, selected_id),
                ),
                Err(e) => (type_options(&[], &filter), Err(e)),
            };
            let grid = panel_or_placeholder(grid, "Error loading slots")?;
            Ok(render(&BookSection::new(types, grid, &selection))?.0)
        }
        DashboardSection::Bookings => {
            let filter = cells.booking_filter();
            let zone = state.config.backend_utc_offset;
            let list = load(&cells.bookings, "bookings", mode, state.api.my_bookings(token))
                .await
                .and_then(|bookings| booking_cards(&bookings, &filter, zone));
            let list = panel_or_placeholder(list, "Error loading bookings")?;
            Ok(render(&BookingsSection::new(&filter, list))?.0)
        }
        DashboardSection::Profile => Ok(render(&ProfileSection::from(&user.profile))?.0),
    }
}

pub async fn page(
    State(state): State<AppState>,
    Extension(user): Extension<UserSession>,
    jar: CookieJar,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Response> {
    let section = DashboardSection::from_key(query.section.as_deref().unwrap_or(""));
    let cells = &user.state;

    // A filter change re-derives from the snapshot already held. Opening a
    // section afresh resets its filter and refetches.
    let mode = match (&query.slot_type, &query.filter) {
        _ if query.keep.is_some() => Load::Reuse,
        (Some(slot_type), _) if section == DashboardSection::Book => {
            cells.set_slot_filter(SlotFilter::from_key(slot_type));
            Load::Reuse
        }
        (_, Some(filter)) if section == DashboardSection::Bookings => {
            cells.set_booking_filter(BookingFilter::from_key(filter));
            Load::Reuse
        }
        _ => {
            match section {
                DashboardSection::Book => cells.set_slot_filter(SlotFilter::All),
                DashboardSection::Bookings => cells.set_booking_filter(BookingFilter::All),
                _ => {}
            }
            Load::Refresh
        }
    };

    let (jar, notice) = session::take_flash(jar);
    let content = section_content(&state, &user, section, mode).await?;
    let mut page = DashboardPage::new(&user_name(&user), section, content);
    page.notice = notice;
    Ok((jar, render(&page)?).into_response())
}

pub async fn select_slot(
    Extension(user): Extension<UserSession>,
    jar: CookieJar,
    Path(slot_id): Path<String>,
) -> Response {
    let cells = &user.state;
    let found = cells.slots.current().and_then(|slots| {
        slots
            .iter()
            .find(|s| s.id == slot_id && s.is_available())
            .map(SelectedSlot::from)
    });

    let jar = match found {
        Some(slot) => {
            tracing::debug!("Selected slot {}", slot.number);
            cells.selection().slot = Some(slot);
            jar
        }
        None => session::flash(jar, "That slot is no longer available"),
    };
    (jar, Redirect::to(BOOK_VIEW)).into_response()
}

pub async fn update_summary(
    Extension(user): Extension<UserSession>,
    Form(form): Form<DurationForm>,
) -> Response {
    user.state.selection().duration = parse_duration(&form.duration);
    Redirect::to(BOOK_VIEW).into_response()
}

/// Submits the current selection. Nothing is sent to the backend unless a
/// slot is selected and the duration is at least one hour.
pub async fn book(
    State(state): State<AppState>,
    Extension(user): Extension<UserSession>,
    jar: CookieJar,
    Form(form): Form<DurationForm>,
) -> AppResult<Response> {
    let duration = parse_duration(&form.duration);
    let slot = {
        let mut selection = user.state.selection();
        selection.duration = duration;
        selection.slot.clone()
    };

    let Some(slot) = slot else {
        let jar = session::flash(jar, "Please select a parking slot");
        return Ok((jar, Redirect::to(BOOK_VIEW)).into_response());
    };
    if duration < 1 {
        let jar = session::flash(jar, "Please enter a valid duration");
        return Ok((jar, Redirect::to(BOOK_VIEW)).into_response());
    }

    match state.api.create_booking(&user.token, &slot.id, duration).await {
        Ok(created) => {
            tracing::info!(
                "Booked slot {} for {duration}h (booking {:?})",
                slot.number,
                created.booking_id
            );
            *user.state.selection() = Selection::default();
            let notice = match created.total_amount {
                Some(total) => format!("Booking successful! Total: ₹{}", format_amount(total)),
                None => "Booking successful!".to_string(),
            };
            let jar = session::flash(jar, &notice);
            Ok((jar, Redirect::to("/dashboard?section=bookings")).into_response())
        }
        Err(AppError::Denied) => Err(AppError::Denied),
        Err(e) => {
            tracing::warn!("Booking failed: {e}");
            let jar = session::flash(jar, &e.notice_or("Booking failed"));
            Ok((jar, Redirect::to(BOOK_VIEW)).into_response())
        }
    }
}

pub async fn confirm_cancel(
    State(state): State<AppState>,
    Extension(user): Extension<UserSession>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = valid_id(&id)?;
    let overlay = ConfirmDialog {
        message: "Are you sure you want to cancel this booking?",
        action: format!("/dashboard/bookings/{id}/cancel"),
        confirm_label: "Cancel booking",
        with_reason: false,
    }
    .to_html()?;

    let section = DashboardSection::Bookings;
    let content = section_content(&state, &user, section, Load::Reuse).await?;
    let mut page = DashboardPage::new(&user_name(&user), section, content);
    page.overlay = Some(overlay);
    Ok(render(&page)?.into_response())
}

pub async fn cancel(
    State(state): State<AppState>,
    Extension(user): Extension<UserSession>,
    jar: CookieJar,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = valid_id(&id)?;
    match state.api.cancel_booking(&user.token, id).await {
        Ok(_) => {
            tracing::info!("Cancelled booking {id}");
            let jar = session::flash(jar, "Booking cancelled successfully");
            Ok((jar, Redirect::to("/dashboard?section=bookings")).into_response())
        }
        Err(AppError::Denied) => Err(AppError::Denied),
        Err(e) => {
            tracing::warn!("Cancel failed for booking {id}: {e}");
            let jar = session::flash(jar, &e.notice_or("Failed to cancel booking"));
            Ok((jar, Redirect::to("/dashboard?section=bookings&keep=1")).into_response())
        }
    }
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<UserSession>,
    jar: CookieJar,
    Form(mut form): Form<ProfileUpdate>,
) -> AppResult<Response> {
    const PROFILE_VIEW: &str = "/dashboard?section=profile";

    form.full_name = form.full_name.trim().to_string();
    if form.full_name.is_empty() {
        let jar = session::flash(jar, "Name is required");
        return Ok((jar, Redirect::to(PROFILE_VIEW)).into_response());
    }

    match state.api.update_profile(&user.token, &form).await {
        Ok(mut updated) => {
            // Some backends answer with a partial profile
            if updated.email.is_empty() {
                updated.email = user.profile.email.clone();
            }
            if updated.role.is_none() {
                updated.role = user.profile.role.clone();
            }
            let jar = jar.add(session::profile_cookie(
                Realm::User,
                &updated,
                state.config.secure_cookies,
            ));
            let jar = session::flash(jar, "Profile updated successfully!");
            Ok((jar, Redirect::to(PROFILE_VIEW)).into_response())
        }
        Err(AppError::Denied) => Err(AppError::Denied),
        Err(e) => {
            tracing::warn!("Profile update failed: {e}");
            let jar = session::flash(jar, &e.notice_or("Failed to update profile"));
            Ok((jar, Redirect::to(PROFILE_VIEW)).into_response())
        }
    }
}

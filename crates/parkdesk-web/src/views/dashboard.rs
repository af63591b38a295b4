use askama::Template;
use chrono::FixedOffset;

use super::filter::{filter_bookings, filter_slots, BookingFilter, SlotFilter, ALL};
use super::format::{format_amount, format_datetime};
use crate::error::AppResult;
use crate::models::{Booking, BookingStatus, Slot, User};
use crate::state::{BookingSummary, Selection};

/// Sections of the user dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardSection {
    #[default]
    Overview,
    Book,
    Bookings,
    Profile,
}

impl DashboardSection {
    pub const ALL: [DashboardSection; 4] = [
        DashboardSection::Overview,
        DashboardSection::Book,
        DashboardSection::Bookings,
        DashboardSection::Profile,
    ];

    pub fn from_key(key: &str) -> Self {
        match key {
            "book" => Self::Book,
            "bookings" => Self::Bookings,
            "profile" => Self::Profile,
            _ => Self::Overview,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Book => "book",
            Self::Bookings => "bookings",
            Self::Profile => "profile",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Book => "Book a Slot",
            Self::Bookings => "My Bookings",
            Self::Profile => "Profile",
        }
    }
}

pub struct NavLink {
    pub key: &'static str,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Template)]
#[template(path = "dashboard/page.html")]
pub struct DashboardPage {
    pub user_name: String,
    pub nav: Vec<NavLink>,
    pub content: String,
    pub overlay: Option<String>,
    pub notice: Option<String>,
}

impl DashboardPage {
    pub fn new(user_name: &str, section: DashboardSection, content: String) -> Self {
        Self {
            user_name: user_name.to_string(),
            nav: DashboardSection::ALL
                .iter()
                .map(|&s| NavLink {
                    key: s.key(),
                    label: s.label(),
                    active: s == section,
                })
                .collect(),
            content,
            overlay: None,
            notice: None,
        }
    }
}

// Overview

#[derive(Template)]
#[template(path = "dashboard/overview.html")]
pub struct Overview {
    pub total_slots: String,
    pub available_slots: String,
    pub active_bookings: String,
    pub total_spent: String,
}

impl Overview {
    /// Either input may be missing when its fetch failed; its counts read `-`.
    pub fn new(slots: Option<&[Slot]>, bookings: Option<&[Booking]>) -> Self {
        let dash = || "-".to_string();
        let (total_slots, available_slots) = match slots {
            Some(slots) => (
                slots.len().to_string(),
                slots.iter().filter(|s| s.is_available()).count().to_string(),
            ),
            None => (dash(), dash()),
        };
        let (active_bookings, total_spent) = match bookings {
            Some(bookings) => (
                bookings
                    .iter()
                    .filter(|b| b.status == BookingStatus::Active)
                    .count()
                    .to_string(),
                format_amount(bookings.iter().filter_map(|b| b.total_amount).sum()),
            ),
            None => (dash(), dash()),
        };
        Self {
            total_slots,
            available_slots,
            active_bookings,
            total_spent,
        }
    }
}

// Book a slot

pub struct SlotCard {
    pub id: String,
    pub number: String,
    pub slot_type: String,
    pub rate: String,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "dashboard/slot_grid.html")]
struct SlotGrid {
    cards: Vec<SlotCard>,
}

/// Available slots matching `filter`, with the selected one marked.
pub fn slot_grid(slots: &[Slot], filter: &SlotFilter, selected_id: Option<&str>) -> AppResult<String> {
    let cards = filter_slots(slots, filter)
        .into_iter()
        .map(|slot| SlotCard {
            id: slot.id.clone(),
            number: slot.slot_number.clone(),
            slot_type: slot.slot_type.clone(),
            rate: format_amount(slot.hourly_rate),
            selected: selected_id == Some(slot.id.as_str()),
        })
        .collect();
    Ok(SlotGrid { cards }.render()?)
}

pub struct TypeOption {
    pub value: String,
    pub selected: bool,
}

/// `all` followed by every slot type in first-seen order.
pub fn type_options(slots: &[Slot], filter: &SlotFilter) -> Vec<TypeOption> {
    let mut values = vec![ALL.to_string()];
    for slot in slots {
        if !slot.slot_type.is_empty() && !values.contains(&slot.slot_type) {
            values.push(slot.slot_type.clone());
        }
    }
    if let SlotFilter::Type(t) = filter {
        if !values.contains(t) {
            values.push(t.clone());
        }
    }
    values
        .into_iter()
        .map(|value| TypeOption {
            selected: value == filter.key(),
            value,
        })
        .collect()
}

#[derive(Template)]
#[template(path = "dashboard/book.html")]
pub struct BookSection {
    pub types: Vec<TypeOption>,
    pub grid: String,
    pub summary: BookingSummary,
    pub duration: i64,
}

impl BookSection {
    pub fn new(types: Vec<TypeOption>, grid: String, selection: &Selection) -> Self {
        Self {
            types,
            grid,
            summary: selection.summary(),
            duration: selection.duration,
        }
    }
}

// My bookings

pub struct BookingCard {
    pub id: String,
    pub slot: String,
    pub start: String,
    pub duration: i64,
    pub amount: String,
    pub status: String,
    pub cancellable: bool,
}

pub struct FilterLink {
    pub key: &'static str,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Template)]
#[template(path = "dashboard/bookings.html")]
pub struct BookingsSection {
    pub filters: Vec<FilterLink>,
    pub list: String,
}

impl BookingsSection {
    pub fn new(filter: &BookingFilter, list: String) -> Self {
        let filters = [
            ("all", "All"),
            ("active", "Active"),
            ("completed", "Completed"),
            ("cancelled", "Cancelled"),
        ]
        .into_iter()
        .map(|(key, label)| FilterLink {
            key,
            label,
            active: key == filter.key(),
        })
        .collect();
        Self { filters, list }
    }
}

#[derive(Template)]
#[template(path = "dashboard/booking_cards.html")]
struct BookingCards {
    cards: Vec<BookingCard>,
}

/// Booking cards for `filter`; only active bookings offer a cancel action.
pub fn booking_cards(
    bookings: &[Booking],
    filter: &BookingFilter,
    zone: FixedOffset,
) -> AppResult<String> {
    let cards = filter_bookings(bookings, filter)
        .into_iter()
        .map(|b| BookingCard {
            id: b.id.clone(),
            slot: b.slot_label().to_string(),
            start: format_datetime(b.start_time.as_deref(), zone),
            duration: b.duration_hours.unwrap_or(0),
            amount: format_amount(b.total_amount.unwrap_or(0.0)),
            status: b.status.to_string(),
            cancellable: b.status == BookingStatus::Active,
        })
        .collect();
    Ok(BookingCards { cards }.render()?)
}

// Profile

#[derive(Template)]
#[template(path = "dashboard/profile.html")]
pub struct ProfileSection {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub vehicle_number: String,
}

impl From<&User> for ProfileSection {
    fn from(user: &User) -> Self {
        Self {
            full_name: user
                .full_name
                .clone()
                .or_else(|| user.name.clone())
                .unwrap_or_default(),
            email: user.email.clone(),
            phone: user.phone.clone().unwrap_or_default(),
            vehicle_number: user.vehicle_number.clone().unwrap_or_default(),
        }
    }
}

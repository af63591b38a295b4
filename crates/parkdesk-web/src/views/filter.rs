//! Derived views over a snapshot. Filters borrow the snapshot and never
//! modify it; callers re-run them after every refresh or filter change.

use crate::models::{Booking, BookingStatus, Slot};

/// Sentinel filter key meaning "no restriction".
pub const ALL: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SlotFilter {
    #[default]
    All,
    Type(String),
}

impl SlotFilter {
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "" | ALL => Self::All,
            other => Self::Type(other.to_string()),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::All => ALL,
            Self::Type(t) => t,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BookingFilter {
    #[default]
    All,
    Status(BookingStatus),
}

impl BookingFilter {
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "" | ALL => Self::All,
            other => Self::Status(BookingStatus::from(other.to_string())),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::All => ALL,
            Self::Status(s) => s.as_str(),
        }
    }
}

/// Available slots, optionally restricted to one vehicle type.
pub fn filter_slots<'a>(slots: &'a [Slot], filter: &SlotFilter) -> Vec<&'a Slot> {
    slots
        .iter()
        .filter(|s| s.is_available())
        .filter(|s| match filter {
            SlotFilter::All => true,
            SlotFilter::Type(t) => s.slot_type == *t,
        })
        .collect()
}

pub fn filter_bookings<'a>(bookings: &'a [Booking], filter: &BookingFilter) -> Vec<&'a Booking> {
    bookings
        .iter()
        .filter(|b| match filter {
            BookingFilter::All => true,
            BookingFilter::Status(status) => b.status == *status,
        })
        .collect()
}

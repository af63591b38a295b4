//! Per-session page state.
//!
//! Each browser session owns the snapshots its pages render from and, on the
//! user dashboard, the current slot selection. State is keyed by the session
//! token and dropped on logout or when the backend rejects the token.

mod selection;
mod snapshot;

pub use selection::{parse_duration, BookingSummary, SelectedSlot, Selection};
pub use snapshot::SnapshotCell;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use crate::models::{AdminBooking, Booking, DashboardStats, ParkingSpace, Slot, User};
use crate::views::filter::{BookingFilter, SlotFilter};

const IDLE_EXPIRY: Duration = Duration::from_secs(12 * 60 * 60);

#[derive(Default)]
pub struct UserState {
    pub slots: SnapshotCell<Vec<Slot>>,
    pub bookings: SnapshotCell<Vec<Booking>>,
    selection: Mutex<Selection>,
    slot_filter: Mutex<SlotFilter>,
    booking_filter: Mutex<BookingFilter>,
}

impl UserState {
    pub fn selection(&self) -> MutexGuard<'_, Selection> {
        self.selection.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn slot_filter(&self) -> SlotFilter {
        self.slot_filter
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    pub fn set_slot_filter(&self, filter: SlotFilter) {
        *self.slot_filter.lock().unwrap_or_else(|p| p.into_inner()) = filter;
    }

    pub fn booking_filter(&self) -> BookingFilter {
        self.booking_filter
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    pub fn set_booking_filter(&self, filter: BookingFilter) {
        *self.booking_filter.lock().unwrap_or_else(|p| p.into_inner()) = filter;
    }
}

#[derive(Default)]
pub struct AdminState {
    pub stats: SnapshotCell<DashboardStats>,
    pub pending: SnapshotCell<Vec<ParkingSpace>>,
    pub spaces: SnapshotCell<Vec<ParkingSpace>>,
    pub users: SnapshotCell<Vec<User>>,
    pub bookings: SnapshotCell<Vec<AdminBooking>>,
}

struct Entry<S> {
    state: Arc<S>,
    last_seen: Instant,
}

struct Table<S> {
    entries: Mutex<HashMap<String, Entry<S>>>,
}

impl<S: Default> Table<S> {
    fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn get_or_create(&self, token: &str) -> Arc<S> {
        let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
        let now = Instant::now();

        if !entries.contains_key(token) {
            entries.retain(|_, e| now.duration_since(e.last_seen) < IDLE_EXPIRY);
        }

        let entry = entries.entry(token.to_string()).or_insert_with(|| Entry {
            state: Arc::new(S::default()),
            last_seen: now,
        });
        entry.last_seen = now;
        entry.state.clone()
    }

    fn remove(&self, token: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .remove(token);
    }
}

pub struct SessionRegistry {
    users: Table<UserState>,
    admins: Table<AdminState>,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self {
            users: Table::new(),
            admins: Table::new(),
        }
    }
}

impl SessionRegistry {
    pub fn user(&self, token: &str) -> Arc<UserState> {
        self.users.get_or_create(token)
    }

    pub fn admin(&self, token: &str) -> Arc<AdminState> {
        self.admins.get_or_create(token)
    }

    pub fn forget_user(&self, token: &str) {
        self.users.remove(token);
    }

    pub fn forget_admin(&self, token: &str) {
        self.admins.remove(token);
    }
}

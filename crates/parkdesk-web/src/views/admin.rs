use askama::Template;
use chrono::FixedOffset;

use super::expiry::{display_status, is_expired, status_badge, Clock};
use super::format::{format_amount, format_date, format_datetime, image_src, or_na, short_id};
use crate::error::AppResult;
use crate::models::{AdminBooking, DashboardStats, ParkingDetail, ParkingSpace, User, UserDetail};

/// The four list views of the admin console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Pending,
    AllParking,
    Users,
    Bookings,
}

impl AdminTab {
    pub const ALL: [AdminTab; 4] = [
        AdminTab::Pending,
        AdminTab::AllParking,
        AdminTab::Users,
        AdminTab::Bookings,
    ];

    pub fn from_key(key: &str) -> Self {
        match key {
            "all-parking" => Self::AllParking,
            "users" => Self::Users,
            "bookings" => Self::Bookings,
            _ => Self::Pending,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::AllParking => "all-parking",
            Self::Users => "users",
            Self::Bookings => "bookings",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending Approvals",
            Self::AllParking => "All Parking",
            Self::Users => "Users",
            Self::Bookings => "Bookings",
        }
    }
}

pub struct TabLink {
    pub key: &'static str,
    pub label: &'static str,
    pub active: bool,
}

pub fn tab_links(active: AdminTab) -> Vec<TabLink> {
    AdminTab::ALL
        .iter()
        .map(|&tab| TabLink {
            key: tab.key(),
            label: tab.label(),
            active: tab == active,
        })
        .collect()
}

/// Headline counts; every field reads `-` until the first successful fetch.
pub struct StatsView {
    pub total_users: String,
    pub active_listings: String,
    pub pending_approvals: String,
    pub total_revenue: String,
    pub total_bookings: String,
}

impl StatsView {
    pub fn unavailable() -> Self {
        let dash = || "-".to_string();
        Self {
            total_users: dash(),
            active_listings: dash(),
            pending_approvals: dash(),
            total_revenue: dash(),
            total_bookings: dash(),
        }
    }
}

impl From<&DashboardStats> for StatsView {
    fn from(stats: &DashboardStats) -> Self {
        Self {
            total_users: stats.users.total.to_string(),
            active_listings: stats.parking_spaces.approved.to_string(),
            pending_approvals: stats.parking_spaces.pending.to_string(),
            total_revenue: format!("{:.2}", stats.revenue.total),
            total_bookings: stats.bookings.total.to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/console.html")]
pub struct ConsolePage {
    pub stats: StatsView,
    pub tab: &'static str,
    pub tabs: Vec<TabLink>,
    pub panel: String,
    pub overlay: Option<String>,
    pub notice: Option<String>,
}

#[derive(Template)]
#[template(path = "admin/login.html")]
pub struct AdminLoginPage {
    pub notice: Option<String>,
}

// Tables

/// The listing's own contact number, else the owner's account phone. Blank
/// values count as missing.
fn contact_phone(listing: Option<&str>, account: Option<&str>) -> String {
    or_na(listing.filter(|p| !p.is_empty()).or(account))
}

pub struct PendingRow {
    pub id: String,
    pub title: String,
    pub address: String,
    pub vehicle_type: String,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: String,
    pub price: String,
    pub available_from: String,
    pub available_to: String,
    pub expired: bool,
    pub status_label: String,
    pub status_class: String,
    pub created: String,
}

impl PendingRow {
    fn new(space: &ParkingSpace, clock: Clock) -> Self {
        let expired = is_expired(space.available_to.as_deref(), clock);
        let owner = space.owner.clone().unwrap_or_default();
        Self {
            id: space.id.clone(),
            title: space.title.clone(),
            address: space.address.clone(),
            vehicle_type: space.vehicle_type.clone(),
            owner_name: owner.name,
            owner_email: owner.email,
            owner_phone: contact_phone(space.owner_phone.as_deref(), owner.phone.as_deref()),
            price: format_amount(space.price_per_hour),
            available_from: format_datetime(space.available_from.as_deref(), clock.zone),
            available_to: format_datetime(space.available_to.as_deref(), clock.zone),
            expired,
            status_label: display_status(&space.status, expired),
            status_class: status_badge(&space.status, expired),
            created: format_date(space.created_at.as_deref(), clock.zone),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/pending_table.html")]
struct PendingTable {
    rows: Vec<PendingRow>,
}

/// Spaces awaiting review. Approve is disabled on expired rows.
pub fn pending_table(spaces: &[ParkingSpace], clock: Clock) -> AppResult<String> {
    let rows = spaces.iter().map(|s| PendingRow::new(s, clock)).collect();
    Ok(PendingTable { rows }.render()?)
}

pub struct SpaceRow {
    pub id: String,
    pub title: String,
    pub owner_name: String,
    pub address: String,
    pub vehicle_type: String,
    pub price: String,
    pub status_label: String,
    pub status_class: String,
}

#[derive(Template)]
#[template(path = "admin/spaces_table.html")]
struct SpacesTable {
    rows: Vec<SpaceRow>,
}

pub fn spaces_table(spaces: &[ParkingSpace], clock: Clock) -> AppResult<String> {
    let rows = spaces
        .iter()
        .map(|space| {
            let expired = is_expired(space.available_to.as_deref(), clock);
            SpaceRow {
                id: space.id.clone(),
                title: space.title.clone(),
                owner_name: space.owner.as_ref().map(|o| o.name.clone()).unwrap_or_default(),
                address: space.address.clone(),
                vehicle_type: space.vehicle_type.clone(),
                price: format_amount(space.price_per_hour),
                status_label: display_status(&space.status, expired),
                status_class: status_badge(&space.status, expired),
            }
        })
        .collect();
    Ok(SpacesTable { rows }.render()?)
}

pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub role_class: &'static str,
    pub active_label: &'static str,
    pub active_class: &'static str,
    pub joined: String,
}

impl UserRow {
    fn new(user: &User, zone: FixedOffset) -> Self {
        Self {
            id: user.id.clone().unwrap_or_default(),
            name: user.display_name().to_string(),
            email: user.email.clone(),
            phone: or_na(user.phone.as_deref()),
            role: user.role().to_string(),
            role_class: if user.is_admin() { "approved" } else { "active" },
            active_label: if user.is_active { "Active" } else { "Inactive" },
            active_class: if user.is_active { "approved" } else { "rejected" },
            joined: format_date(user.created_at.as_deref(), zone),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/users_table.html")]
struct UsersTable {
    rows: Vec<UserRow>,
}

pub fn users_table(users: &[User], zone: FixedOffset) -> AppResult<String> {
    let rows = users.iter().map(|u| UserRow::new(u, zone)).collect();
    Ok(UsersTable { rows }.render()?)
}

pub struct BookingRow {
    pub id: String,
    pub short_id: String,
    pub parking: String,
    pub renter: String,
    pub owner: String,
    pub amount: String,
    pub duration: String,
    pub status: String,
}

#[derive(Template)]
#[template(path = "admin/bookings_table.html")]
struct BookingsTable {
    rows: Vec<BookingRow>,
}

pub fn bookings_table(bookings: &[AdminBooking]) -> AppResult<String> {
    let rows = bookings
        .iter()
        .map(|b| BookingRow {
            id: b.id.clone(),
            short_id: short_id(&b.id),
            parking: b.parking.title.clone(),
            renter: b.user.name.clone(),
            owner: b.owner.name.clone(),
            amount: format_amount(b.total_price),
            duration: duration_label(b.duration_hours),
            status: b.status.to_string(),
        })
        .collect();
    Ok(BookingsTable { rows }.render()?)
}

fn duration_label(hours: Option<i64>) -> String {
    match hours {
        Some(h) if h != 0 => h.to_string(),
        _ => "N/A".to_string(),
    }
}

// Detail overlays

pub struct ImageView {
    pub src: String,
    pub raw: String,
}

#[derive(Template)]
#[template(path = "admin/space_detail.html")]
pub struct SpaceDetail {
    pub title: String,
    pub description: String,
    pub address: String,
    pub vehicle_type: String,
    pub total_spaces: u32,
    pub price: String,
    pub available_from: String,
    pub available_to: String,
    pub expired: bool,
    pub status_label: String,
    pub status_class: String,
    pub payment_methods: String,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: String,
    pub images: Vec<ImageView>,
}

impl SpaceDetail {
    /// Expiry is recomputed here with the same rule the tables use.
    pub fn new(detail: &ParkingDetail, clock: Clock) -> Self {
        let p = &detail.parking;
        let o = &detail.owner;
        let expired = is_expired(p.available_to.as_deref(), clock);
        Self {
            title: p.title.clone(),
            description: or_na(p.description.as_deref()),
            address: p.address.clone(),
            vehicle_type: p.vehicle_type.clone(),
            total_spaces: p.total_spaces.unwrap_or(1),
            price: format_amount(p.price_per_hour),
            available_from: format_datetime(p.available_from.as_deref(), clock.zone),
            available_to: format_datetime(p.available_to.as_deref(), clock.zone),
            expired,
            status_label: display_status(&p.status, expired),
            status_class: status_badge(&p.status, expired),
            payment_methods: match &p.payment_methods {
                Some(methods) if !methods.is_empty() => methods.join(", "),
                _ => "N/A".to_string(),
            },
            owner_name: o.name.clone(),
            owner_email: o.email.clone(),
            owner_phone: contact_phone(p.owner_phone.as_deref(), o.phone.as_deref()),
            images: p
                .images
                .iter()
                .map(|img| ImageView {
                    src: image_src(img),
                    raw: img.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/user_detail.html")]
pub struct UserDetailView {
    pub row: UserRow,
    pub verified: &'static str,
    pub joined: String,
    pub parking_spaces: i64,
    pub bookings_made: i64,
    pub bookings_received: i64,
    pub total_spent: String,
    pub total_earned: String,
}

impl UserDetailView {
    pub fn new(detail: &UserDetail, zone: FixedOffset) -> Self {
        let s = &detail.stats;
        Self {
            row: UserRow::new(&detail.user, zone),
            verified: if detail.user.is_verified { "Yes" } else { "No" },
            joined: format_datetime(detail.user.created_at.as_deref(), zone),
            parking_spaces: s.parking_spaces,
            bookings_made: s.bookings_made,
            bookings_received: s.bookings_received,
            total_spent: format_amount(s.total_spent),
            total_earned: format_amount(s.total_earned),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/booking_detail.html")]
pub struct BookingDetailView {
    pub id: String,
    pub parking: String,
    pub renter: String,
    pub owner: String,
    pub start: String,
    pub end: String,
    pub duration: String,
    pub amount: String,
    pub payment: String,
    pub status: String,
    pub created: String,
}

impl BookingDetailView {
    pub fn new(b: &AdminBooking, zone: FixedOffset) -> Self {
        Self {
            id: b.id.clone(),
            parking: b.parking.title.clone(),
            renter: format!("{} ({})", b.user.name, b.user.email),
            owner: format!("{} ({})", b.owner.name, b.owner.email),
            start: format_datetime(b.start_time.as_deref(), zone),
            end: format_datetime(b.end_time.as_deref(), zone),
            duration: duration_label(b.duration_hours),
            amount: format_amount(b.total_price),
            payment: or_na(b.payment_method.as_deref()),
            status: b.status.to_string(),
            created: format_datetime(b.created_at.as_deref(), zone),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn zone() -> FixedOffset {
        FixedOffset::east_opt(5 * 3600 + 1800).unwrap()
    }

    fn now() -> Clock {
        Clock::at(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(), zone())
    }

    fn space(id: &str, status: &str, available_to: &str) -> ParkingSpace {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("Space {id}"),
            "address": "1 Main St",
            "vehicle_type": "car",
            "price_per_hour": 40,
            "available_from": "2025-01-01T00:00:00",
            "available_to": available_to,
            "status": status,
            "owner": {"name": "Ravi", "email": "ravi@example.com"}
        }))
        .unwrap()
    }

    #[test]
    fn empty_lists_render_placeholder_not_table() {
        let html = pending_table(&[], now()).unwrap();
        assert!(html.contains("No pending approvals"));
        assert!(!html.contains("<table"));

        assert!(spaces_table(&[], now()).unwrap().contains("No parking spaces"));
        assert!(users_table(&[], zone()).unwrap().contains("No users"));
        assert!(bookings_table(&[]).unwrap().contains("No bookings"));
    }

    #[test]
    fn expired_pending_space_cannot_be_approved() {
        let spaces = vec![space("old", "pending", "2025-05-01T00:00:00")];
        let html = pending_table(&spaces, now()).unwrap();
        assert!(html.contains("disabled"));
        assert!(html.contains("expiry-warning"));

        let spaces = vec![space("new", "pending", "2025-07-01T00:00:00")];
        let html = pending_table(&spaces, now()).unwrap();
        assert!(!html.contains("disabled"));
    }

    #[test]
    fn approved_expired_space_reads_expired_in_list_and_detail() {
        let expired = space("p1", "approved", "2025-05-01T00:00:00");

        let list = spaces_table(std::slice::from_ref(&expired), now()).unwrap();
        assert!(list.contains("Expired"));
        assert!(!list.contains(">approved<"));

        let detail = ParkingDetail {
            parking: expired,
            owner: Default::default(),
        };
        let html = SpaceDetail::new(&detail, now()).render().unwrap();
        assert!(html.contains("Expired"));
        assert!(html.contains("This listing has expired"));
    }

    #[test]
    fn blank_listing_phone_falls_back_to_owner() {
        let mut parking = space("p1", "pending", "2025-07-01T00:00:00");
        parking.owner_phone = Some(String::new());
        let detail = ParkingDetail {
            parking,
            owner: serde_json::from_value(serde_json::json!({
                "name": "Ravi", "email": "ravi@example.com", "phone": "9876543210"
            }))
            .unwrap(),
        };
        let html = SpaceDetail::new(&detail, now()).render().unwrap();
        assert!(html.contains("9876543210"));

        assert_eq!(contact_phone(Some(""), None), "N/A");
        assert_eq!(contact_phone(Some("111"), Some("222")), "111");
    }

    #[test]
    fn naive_window_end_is_read_in_backend_zone() {
        // 14:00 at +05:30 is 08:30 UTC, already past at 12:00 UTC
        let spaces = vec![space("p1", "approved", "2025-06-01T14:00:00")];
        let html = spaces_table(&spaces, now()).unwrap();
        assert!(html.contains("Expired"));
    }

    #[test]
    fn rows_keep_input_order() {
        let spaces = vec![
            space("zeta", "approved", "2025-07-01T00:00:00"),
            space("alpha", "rejected", "2025-07-01T00:00:00"),
        ];
        let html = spaces_table(&spaces, now()).unwrap();
        let z = html.find("Space zeta").unwrap();
        let a = html.find("Space alpha").unwrap();
        assert!(z < a);
        assert!(html.contains("rejected"));
    }

    #[test]
    fn server_text_is_escaped() {
        let mut evil = space("x", "pending", "2025-07-01T00:00:00");
        evil.title = "<script>alert(1)</script>".to_string();
        let html = pending_table(&[evil], now()).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn stats_view_formats_revenue() {
        let stats: DashboardStats = serde_json::from_value(serde_json::json!({
            "users": {"total": 3},
            "parking_spaces": {"approved": 2, "pending": 1},
            "bookings": {"total": 9},
            "revenue": {"total": 1500}
        }))
        .unwrap();
        let view = StatsView::from(&stats);
        assert_eq!(view.total_revenue, "1500.00");
        assert_eq!(view.pending_approvals, "1");
    }

    #[test]
    fn tab_keys_round_trip() {
        for tab in AdminTab::ALL {
            assert_eq!(AdminTab::from_key(tab.key()), tab);
        }
        assert_eq!(AdminTab::from_key("nonsense"), AdminTab::Pending);
    }
}

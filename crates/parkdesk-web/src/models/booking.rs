use std::fmt;

use serde::{Deserialize, Serialize};

use super::{opt_string_or_number, string_or_number};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookingStatus {
    Active,
    Completed,
    Cancelled,
    Pending,
    Confirmed,
    Other(String),
}

impl BookingStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BookingStatus::Active => "active",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Other(s) => s,
        }
    }
}

impl Default for BookingStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl From<String> for BookingStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "active" => Self::Active,
            "completed" => Self::Completed,
            "cancelled" => Self::Cancelled,
            "pending" => Self::Pending,
            "confirmed" => Self::Confirmed,
            _ => Self::Other(s),
        }
    }
}

impl From<BookingStatus> for String {
    fn from(s: BookingStatus) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A booking owned by the signed-in user (`GET /api/bookings/my`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    #[serde(alias = "_id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub slot_id: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub slot_number: Option<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub duration_hours: Option<i64>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Booking {
    pub fn slot_label(&self) -> &str {
        self.slot_number
            .as_deref()
            .or(self.slot_id.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpaceRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartyRef {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// A booking as seen by the admin console, joined with its space and parties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminBooking {
    #[serde(alias = "_id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub parking: SpaceRef,
    #[serde(default)]
    pub user: PartyRef,
    #[serde(default)]
    pub owner: PartyRef,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub duration_hours: Option<i64>,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default)]
    pub created_at: Option<String>,
}

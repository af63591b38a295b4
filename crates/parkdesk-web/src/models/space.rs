use std::fmt;

use serde::{Deserialize, Serialize};

use super::string_or_number;

/// Lifecycle status of a listed space or slot. Unknown values are kept
/// verbatim so they can be displayed unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SpaceStatus {
    Pending,
    Approved,
    Rejected,
    Available,
    Occupied,
    Other(String),
}

impl SpaceStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SpaceStatus::Pending => "pending",
            SpaceStatus::Approved => "approved",
            SpaceStatus::Rejected => "rejected",
            SpaceStatus::Available => "available",
            SpaceStatus::Occupied => "occupied",
            SpaceStatus::Other(s) => s,
        }
    }
}

impl Default for SpaceStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl From<String> for SpaceStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => Self::Pending,
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            "available" => Self::Available,
            "occupied" => Self::Occupied,
            _ => Self::Other(s),
        }
    }
}

impl From<SpaceStatus> for String {
    fn from(s: SpaceStatus) -> Self {
        s.as_str().to_string()
    }
}

impl fmt::Display for SpaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OwnerRef {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// A listing submitted by an owner, as returned by the admin endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParkingSpace {
    #[serde(alias = "_id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub vehicle_type: String,
    #[serde(default)]
    pub price_per_hour: f64,
    #[serde(default)]
    pub total_spaces: Option<u32>,
    #[serde(default)]
    pub available_from: Option<String>,
    #[serde(default)]
    pub available_to: Option<String>,
    #[serde(default)]
    pub status: SpaceStatus,
    #[serde(default)]
    pub payment_methods: Option<Vec<String>>,
    #[serde(default)]
    pub owner_phone: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub owner: Option<OwnerRef>,
}

/// Body of `GET /api/parking/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ParkingDetail {
    pub parking: ParkingSpace,
    #[serde(default)]
    pub owner: OwnerRef,
}

/// A bookable slot as listed on the user dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    #[serde(alias = "_id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub slot_number: String,
    #[serde(rename = "type", default)]
    pub slot_type: String,
    #[serde(default)]
    pub hourly_rate: f64,
    #[serde(default)]
    pub status: SpaceStatus,
}

impl Slot {
    pub fn is_available(&self) -> bool {
        self.status == SpaceStatus::Available
    }
}

mod booking;
mod space;
mod stats;
mod user;

pub use booking::{AdminBooking, Booking, BookingStatus};
pub use space::{ParkingDetail, ParkingSpace, Slot, SpaceStatus};
pub use stats::DashboardStats;
pub use user::{User, UserDetail};

use serde::{Deserialize, Deserializer};

/// Accepts a JSON string or number and yields its textual form. The backend
/// is inconsistent about whether identifiers and slot numbers are strings.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => s,
        Scalar::Int(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
    })
}

pub(crate) fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "string_or_number")] String);

    Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|Wrapper(s)| s))
}

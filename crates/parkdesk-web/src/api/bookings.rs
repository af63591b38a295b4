use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{Ack, ApiClient, Empty};
use crate::error::AppResult;
use crate::models::{Booking, Slot};

#[derive(Debug, Serialize)]
struct NewBooking<'a> {
    slot_id: &'a str,
    duration_hours: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct BookingCreated {
    #[serde(default)]
    pub booking_id: Option<String>,
    #[serde(default)]
    pub total_amount: Option<f64>,
}

impl ApiClient {
    pub async fn slots(&self, token: &str) -> AppResult<Vec<Slot>> {
        self.get(token, "/slots").await
    }

    pub async fn my_bookings(&self, token: &str) -> AppResult<Vec<Booking>> {
        self.get(token, "/bookings/my").await
    }

    pub async fn create_booking(
        &self,
        token: &str,
        slot_id: &str,
        duration_hours: i64,
    ) -> AppResult<BookingCreated> {
        self.send(
            Method::POST,
            token,
            "/bookings",
            &NewBooking {
                slot_id,
                duration_hours,
            },
        )
        .await
    }

    pub async fn cancel_booking(&self, token: &str, id: &str) -> AppResult<Ack> {
        self.send(Method::PUT, token, &format!("/bookings/{id}/cancel"), &Empty {})
            .await
    }
}

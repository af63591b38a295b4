use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{Ack, ApiClient, Empty};
use crate::error::AppResult;
use crate::models::{AdminBooking, DashboardStats, ParkingDetail, ParkingSpace, User, UserDetail};

#[derive(Debug, Deserialize)]
struct SpaceList {
    #[serde(default)]
    parking_spaces: Vec<ParkingSpace>,
}

#[derive(Debug, Deserialize)]
struct UserList {
    #[serde(default)]
    users: Vec<User>,
}

#[derive(Debug, Deserialize)]
struct BookingList {
    #[serde(default)]
    bookings: Vec<AdminBooking>,
}

#[derive(Debug, Deserialize)]
struct BookingEnvelope {
    booking: AdminBooking,
}

#[derive(Debug, Serialize)]
struct RejectBody<'a> {
    reason: &'a str,
}

impl ApiClient {
    pub async fn dashboard_stats(&self, token: &str) -> AppResult<DashboardStats> {
        self.get(token, "/admin/dashboard").await
    }

    pub async fn pending_spaces(&self, token: &str) -> AppResult<Vec<ParkingSpace>> {
        let list: SpaceList = self.get(token, "/admin/parking/pending").await?;
        Ok(list.parking_spaces)
    }

    pub async fn all_spaces(&self, token: &str) -> AppResult<Vec<ParkingSpace>> {
        let list: SpaceList = self.get(token, "/admin/parking/all").await?;
        Ok(list.parking_spaces)
    }

    pub async fn users(&self, token: &str) -> AppResult<Vec<User>> {
        let list: UserList = self.get(token, "/admin/users").await?;
        Ok(list.users)
    }

    pub async fn user_detail(&self, token: &str, id: &str) -> AppResult<UserDetail> {
        self.get(token, &format!("/admin/users/{id}")).await
    }

    pub async fn admin_bookings(&self, token: &str) -> AppResult<Vec<AdminBooking>> {
        let list: BookingList = self.get(token, "/admin/bookings").await?;
        Ok(list.bookings)
    }

    pub async fn admin_booking(&self, token: &str, id: &str) -> AppResult<AdminBooking> {
        let envelope: BookingEnvelope = self.get(token, &format!("/admin/bookings/{id}")).await?;
        Ok(envelope.booking)
    }

    pub async fn parking_detail(&self, token: &str, id: &str) -> AppResult<ParkingDetail> {
        self.get(token, &format!("/parking/{id}")).await
    }

    pub async fn approve_space(&self, token: &str, id: &str) -> AppResult<Ack> {
        self.send(Method::POST, token, &format!("/admin/parking/{id}/approve"), &Empty {})
            .await
    }

    /// `reason` is forwarded as-is; callers pass an empty string when none was given.
    pub async fn reject_space(&self, token: &str, id: &str, reason: &str) -> AppResult<Ack> {
        self.send(
            Method::POST,
            token,
            &format!("/admin/parking/{id}/reject"),
            &RejectBody { reason },
        )
        .await
    }

    pub async fn toggle_user_status(&self, token: &str, id: &str) -> AppResult<Ack> {
        self.send(
            Method::POST,
            token,
            &format!("/admin/users/{id}/toggle-status"),
            &Empty {},
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn reject_sends_reason_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/admin/parking/p9/reject"))
            .and(header("Authorization", "Bearer admin-tok"))
            .and(body_json(serde_json::json!({"reason": ""})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"message": "Parking space rejected"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri()).unwrap();
        let ack = client.reject_space("admin-tok", "p9", "").await.unwrap();
        assert_eq!(ack.message.as_deref(), Some("Parking space rejected"));
    }

    #[tokio::test]
    async fn pending_spaces_unwraps_envelope_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/admin/parking/pending"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "count": 2,
                "parking_spaces": [
                    {"id": "b", "title": "Second listed first", "status": "pending"},
                    {"id": "a", "title": "Then this", "status": "pending"}
                ]
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri()).unwrap();
        let spaces = client.pending_spaces("t").await.unwrap();
        let ids: Vec<_> = spaces.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[tokio::test]
    async fn dashboard_stats_fills_missing_counts_with_zero() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/admin/dashboard"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "users": {"total": 7},
                "parking_spaces": {"approved": 3, "pending": 2},
                "revenue": {"total": 1250.5}
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri()).unwrap();
        let stats = client.dashboard_stats("t").await.unwrap();
        assert_eq!(stats.users.total, 7);
        assert_eq!(stats.parking_spaces.pending, 2);
        assert_eq!(stats.bookings.total, 0);
        assert_eq!(stats.revenue.total, 1250.5);
    }
}

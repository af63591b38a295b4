use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Count {
    #[serde(default)]
    pub total: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpaceCounts {
    #[serde(default)]
    pub pending: i64,
    #[serde(default)]
    pub approved: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Revenue {
    #[serde(default)]
    pub total: f64,
}

/// Aggregate counts shown at the top of the admin console.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub users: Count,
    #[serde(default)]
    pub parking_spaces: SpaceCounts,
    #[serde(default)]
    pub bookings: Count,
    #[serde(default)]
    pub revenue: Revenue,
}

/// Per-user activity returned alongside a user detail.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserStats {
    #[serde(default)]
    pub parking_spaces: i64,
    #[serde(default)]
    pub bookings_made: i64,
    #[serde(default)]
    pub bookings_received: i64,
    #[serde(default)]
    pub total_spent: f64,
    #[serde(default)]
    pub total_earned: f64,
}

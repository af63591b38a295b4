use serde::{Deserialize, Serialize};

use super::stats::UserStats;

/// Account record. The backend names the display name `name` on admin
/// endpoints and `full_name` on the user-facing ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub vehicle_number: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_true() -> bool {
    true
}

impl User {
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .or(self.name.as_deref())
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.email)
    }

    pub fn role(&self) -> &str {
        self.role.as_deref().unwrap_or("user")
    }

    pub fn is_admin(&self) -> bool {
        self.role() == "admin"
    }
}

/// Body of `GET /api/admin/users/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserDetail {
    pub user: User,
    #[serde(default)]
    pub stats: UserStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_full_name_then_name_then_email() {
        let mut user = User {
            email: "a@example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "a@example.com");

        user.name = Some("Asha".to_string());
        assert_eq!(user.display_name(), "Asha");

        user.full_name = Some("Asha Rao".to_string());
        assert_eq!(user.display_name(), "Asha Rao");
    }

    #[test]
    fn missing_active_flag_defaults_to_active() {
        let user: User = serde_json::from_str(r#"{"email":"b@example.com"}"#).unwrap();
        assert!(user.is_active);
        assert!(!user.is_verified);
        assert_eq!(user.role(), "user");
    }
}

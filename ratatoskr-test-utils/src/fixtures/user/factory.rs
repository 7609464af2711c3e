//! Factory functions for in-memory user models.

use chrono::Utc;

use crate::model::UserModel;

/// Create a `PLAYER` user model without touching the database.
pub fn mock_user_model(user_id: i64, username: &str) -> UserModel {
    let now = Utc::now().naive_utc();
    UserModel {
        id: user_id,
        username: username.to_string(),
        email: Some("player@example.com".to_string()),
        phone: None,
        role_name: Some("PLAYER".to_string()),
        has_ban: false,
        jailed_at: None,
        created_at: now,
        updated_at: now,
    }
}

//! Factory functions for in-memory profile and quota models.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

use crate::model::{GameProfileModel, GameProfileQuotaModel};

static NEXT_FIXTURE_ID: AtomicI64 = AtomicI64::new(10_000);

/// Next primary key for fixture rows.
///
/// Fixture ids stay far below generated snowflake ids, so they never collide.
pub fn next_fixture_id() -> i64 {
    NEXT_FIXTURE_ID.fetch_add(1, Ordering::Relaxed)
}

/// Deterministic UUID-shaped string derived from a fixture id.
pub fn fixture_uuid(id: i64) -> String {
    format!("00000000-0000-7000-8000-{:012x}", id)
}

pub fn mock_profile_model(user_id: i64, name: &str) -> GameProfileModel {
    let now = Utc::now().naive_utc();
    let id = next_fixture_id();
    GameProfileModel {
        id,
        user_id,
        uuid: fixture_uuid(id),
        name: name.to_string(),
        skin_library_id: None,
        cape_library_id: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn mock_quota_model(user_id: i64, total: i32, used: i32) -> GameProfileQuotaModel {
    let now = Utc::now().naive_utc();
    GameProfileQuotaModel {
        id: next_fixture_id(),
        user_id,
        total,
        used,
        created_at: now,
        updated_at: now,
    }
}

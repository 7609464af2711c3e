//! Database model type aliases for test utilities.
//!
//! These aliases match those in the main ratatoskr crate so fixtures and tests
//! read the same way.

pub type RoleModel = entity::role::Model;
pub type UserModel = entity::user::Model;
pub type GameProfileModel = entity::game_profile::Model;
pub type GameProfileQuotaModel = entity::game_profile_quota::Model;
pub type GameProfileQuotaLogModel = entity::game_profile_quota_log::Model;

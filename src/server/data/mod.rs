//! Data access layer repositories.
//!
//! Repositories are generic over [`sea_orm::ConnectionTrait`] so the same code
//! runs on a pooled connection or inside an open transaction.

pub mod game_profile;
pub mod game_profile_quota;
pub mod game_profile_quota_log;
pub mod role;
pub mod user;

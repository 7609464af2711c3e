//! Test fixture modules for database rows and HTTP mocks.
//!
//! - `game_profile` - profiles, quotas and quota log entries
//! - `identity` - OAuth userinfo endpoints
//! - `user` - roles and users

pub mod game_profile;
pub mod identity;
pub mod user;

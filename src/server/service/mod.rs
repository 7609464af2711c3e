//! Service layer for business logic and orchestration.
//!
//! Services coordinate repositories, the identity provider and the user cache.
//! The game profile service is the allocation coordinator: it owns the
//! transaction that ties the quota, the profile registry and the audit log
//! together.

pub mod game_profile;
pub mod retry;
pub mod role;
pub mod user;

//! Best-effort Valkey/Redis caches.
//!
//! Nothing in here is a source of truth: callers fall back to the database on a
//! miss or an error.

pub mod user;

//! Ratatoskr allocates named game profiles against a per-user quota and keeps
//! an append-only ledger of every quota change.

pub mod model;
pub mod server;

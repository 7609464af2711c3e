//! Serializable request and response bodies of the HTTP API.

pub mod api;
pub mod game_profile;
pub mod user;

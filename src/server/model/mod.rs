//! Server application models.
//!
//! Application state, the explicit storage handle bundle, database model type
//! aliases and the quota operation vocabulary.

pub mod app;
pub mod db;
pub mod quota_operation;

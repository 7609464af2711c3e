//! Utility helpers for server operations.

pub mod snowflake;

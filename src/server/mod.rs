//! Server application core modules.
//!
//! HTTP routing and controllers, the allocation and identity services, the
//! repositories over the relational store, the user cache and the supporting
//! configuration, error and ID generation modules.

pub mod cache;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod identity;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;

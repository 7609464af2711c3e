//! Request helpers shared by controllers.

pub mod auth_user;

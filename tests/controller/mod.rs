//! Tests for HTTP controller endpoints.
//!
//! Handlers are called directly with their extractors for service-level
//! behavior, and through the full router where bearer token resolution matters.

mod game_profile;
mod timeout;
mod user;

use ratatoskr_test_utils::prelude::*;

use crate::util::TestContextExt;

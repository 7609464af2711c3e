//! Role and user fixture utilities.

pub mod data;
pub mod factory;

use crate::TestContext;

impl TestContext {
    pub fn user<'a>(&'a self) -> UserFixtures<'a> {
        UserFixtures { setup: self }
    }
}

pub struct UserFixtures<'a> {
    setup: &'a TestContext,
}

//! Game profile, quota and quota log fixture utilities.

pub mod data;
pub mod factory;

use crate::TestContext;

impl TestContext {
    pub fn game_profile<'a>(&'a self) -> GameProfileFixtures<'a> {
        GameProfileFixtures { setup: self }
    }
}

pub struct GameProfileFixtures<'a> {
    setup: &'a TestContext,
}

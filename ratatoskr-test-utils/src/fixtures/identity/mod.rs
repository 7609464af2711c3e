pub mod mockito;

use crate::TestContext;

impl TestContext {
    pub fn identity<'a>(&'a mut self) -> IdentityFixtures<'a> {
        IdentityFixtures { setup: self }
    }
}

pub struct IdentityFixtures<'a> {
    setup: &'a mut TestContext,
}

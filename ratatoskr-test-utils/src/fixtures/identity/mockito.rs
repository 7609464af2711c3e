//! OAuth userinfo HTTP mock endpoint utilities.

use mockito::{Matcher, Mock};

use crate::{
    constant::{TEST_EMAIL, TEST_USERINFO_PATH},
    fixtures::identity::IdentityFixtures,
};

impl<'a> IdentityFixtures<'a> {
    /// Mock GET userinfo for `Bearer <token>`, answering with the given subject and `TEST_EMAIL`.
    ///
    /// # Arguments
    /// - `token` - Bearer token the request must carry
    /// - `sub` - Subject identifier returned to the caller
    /// - `nickname` - Nickname returned to the caller
    /// - `expected_requests` - Number of times the endpoint must be called
    pub fn create_userinfo_endpoint(
        &mut self,
        token: &str,
        sub: i64,
        nickname: &str,
        expected_requests: usize,
    ) -> Mock {
        let body = serde_json::json!({
            "sub": sub.to_string(),
            "nickname": nickname,
            "email": TEST_EMAIL,
            "phone": "",
        });

        self.setup
            .server
            .mock("GET", TEST_USERINFO_PATH)
            .match_header("authorization", Matcher::Exact(format!("Bearer {}", token)))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Mock GET userinfo for `Bearer <token>`, answering with an error status.
    pub fn create_userinfo_error_endpoint(
        &mut self,
        token: &str,
        status: usize,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock("GET", TEST_USERINFO_PATH)
            .match_header("authorization", Matcher::Exact(format!("Bearer {}", token)))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"invalid_token"}"#)
            .expect(expected_requests)
            .create()
    }
}

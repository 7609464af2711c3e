//! Client for the upstream OAuth identity provider.
//!
//! The provider verifies bearer tokens; this service trusts the userinfo it
//! returns without re-validating the token.

use serde::Deserialize;

use crate::server::error::{auth::AuthError, Error};

/// Verified identity returned by the userinfo endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct UserInfo {
    pub sub: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    userinfo_url: String,
}

impl IdentityClient {
    pub fn new(userinfo_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            userinfo_url: userinfo_url.into(),
        }
    }

    /// Resolve a bearer token to the identity it was issued for.
    ///
    /// # Returns
    /// - `Ok(UserInfo)` - Token accepted by the provider
    /// - `Err(Error::AuthError(AuthError::TokenRejected))` - Provider answered with a non-success status
    /// - `Err(Error::ReqwestError)` - Provider unreachable or returned an undecodable body
    pub async fn userinfo(&self, bearer: &str) -> Result<UserInfo, Error> {
        let response = self
            .http
            .get(&self.userinfo_url)
            .bearer_auth(bearer)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = %status, "Identity provider rejected access token");
            return Err(AuthError::TokenRejected(status.as_u16()).into());
        }

        Ok(response.json::<UserInfo>().await?)
    }
}

#[cfg(test)]
mod tests {
    use ratatoskr_test_utils::prelude::*;

    use super::*;

    /// Expect the provider's identity to be returned for an accepted token
    #[tokio::test]
    async fn resolves_accepted_token() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_userinfo_endpoint(TEST_ACCESS_TOKEN, TEST_USER_ID, TEST_NICKNAME, 1)
            .build()
            .await?;
        let client = IdentityClient::new(test.userinfo_url());

        let result = client.userinfo(TEST_ACCESS_TOKEN).await;

        let info = result.unwrap();
        assert_eq!(info.sub, TEST_USER_ID.to_string());
        assert_eq!(info.nickname, TEST_NICKNAME);
        test.assert_mocks();

        Ok(())
    }

    /// Expect TokenRejected when the provider answers 401
    #[tokio::test]
    async fn fails_for_rejected_token() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_userinfo_error_endpoint("expired", 401, 1)
            .build()
            .await?;
        let client = IdentityClient::new(test.userinfo_url());

        let result = client.userinfo("expired").await;

        assert!(matches!(
            result,
            Err(Error::AuthError(AuthError::TokenRejected(401)))
        ));
        test.assert_mocks();

        Ok(())
    }
}

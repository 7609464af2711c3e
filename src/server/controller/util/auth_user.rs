use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};

use crate::server::{
    error::{auth::AuthError, Error},
    model::{app::AppState, db::UserModel},
    service::user::UserService,
};

/// Local user behind the request's bearer token.
///
/// The token is resolved through the identity provider and the user row is
/// created on first sign-in. Rejects with 401 when the `Authorization` header is
/// missing or does not use the `Bearer` scheme, without calling the provider.
pub struct AuthUser(pub UserModel);

/// Token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingBearerToken)?;

    match value.trim().split_once(' ') {
        Some((scheme, token))
            if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() =>
        {
            Ok(token.trim())
        }
        _ => Err(AuthError::MissingBearerToken),
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let userinfo = state.identity.userinfo(token).await?;
        let user = UserService::new(&state.store).take_user(&userinfo).await?;

        Ok(Self(user))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};

    use super::bearer_token;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    /// Expect the token to be extracted regardless of scheme casing
    #[test]
    fn extracts_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")).unwrap(), "abc.def");
        assert_eq!(bearer_token(&headers("bearer xyz")).unwrap(), "xyz");
    }

    /// Expect missing headers, other schemes and empty tokens to be rejected
    #[test]
    fn rejects_missing_or_malformed_header() {
        assert!(bearer_token(&HeaderMap::new()).is_err());
        assert!(bearer_token(&headers("Basic dXNlcjpwYXNz")).is_err());
        assert!(bearer_token(&headers("Bearer ")).is_err());
        assert!(bearer_token(&headers("Bearer")).is_err());
    }
}

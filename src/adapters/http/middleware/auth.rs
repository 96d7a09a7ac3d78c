//! Bearer-token authentication extractors.
//!
//! Two flavors, matching the two kinds of endpoints:
//!
//! - [`RequireAuth`] rejects with 401 when no valid session is attached.
//!   Account-scoped mutations fail closed.
//! - [`OptionalAuth`] resolves the session if present and carries `None`
//!   otherwise. Read paths degrade to the anonymous view instead of
//!   rejecting.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::domain::foundation::DomainError;
use crate::domain::user::User;

use super::super::{ApiError, AppState};

/// Extractor for endpoints that demand an authenticated session.
pub struct RequireAuth(pub User);

/// Extractor for endpoints where authentication is optional.
pub struct OptionalAuth(pub Option<User>);

/// Pull the bearer token out of the Authorization header, if any.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = state.identity_handler().resolve(bearer_token(parts)).await;
        Ok(OptionalAuth(user))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match state.identity_handler().resolve(bearer_token(parts)).await {
            Some(user) => Ok(RequireAuth(user)),
            None => Err(ApiError(DomainError::unauthorized(
                "Authentication is required",
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = value {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn bearer_token_extracts_the_token() {
        let parts = parts_with_auth(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&parts), Some("abc.def.ghi"));
    }

    #[test]
    fn missing_header_yields_none() {
        assert_eq!(bearer_token(&parts_with_auth(None)), None);
    }

    #[test]
    fn non_bearer_schemes_yield_none() {
        let parts = parts_with_auth(Some("Basic dXNlcjpwdw=="));
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn empty_bearer_value_yields_none() {
        let parts = parts_with_auth(Some("Bearer "));
        assert_eq!(bearer_token(&parts), None);
    }
}

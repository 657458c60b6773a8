//! Caller identity.
//!
//! Sign-in is handled by an external identity provider; requests arrive with
//! the provider's user id in `X-User-Id`. The id is opaque here and is never
//! validated or generated by this service.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::utils::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";

const SIGN_IN_MESSAGE: &str = "Please sign in to book tickets";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::AuthError(SIGN_IN_MESSAGE.to_string()))?;

        Ok(CurrentUser(user_id.to_string()))
    }
}

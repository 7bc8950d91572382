use axum::extract::FromRequestParts;
use axum::http::{StatusCode, request::Parts};

use crate::services::auth::Claims;

/// Extractor for the verified claim set the access guard put into request
/// extensions.
///
/// A handler taking this type can only run behind `access::require`; if the
/// claims are missing the route is not guarded (wiring error) and the request
/// is rejected with 401 rather than running the handler unauthorized.
pub struct AuthClaims(pub Claims);

impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthClaims)
            .ok_or(StatusCode::UNAUTHORIZED)
    }
}

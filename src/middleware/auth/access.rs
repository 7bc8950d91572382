//! Permission-guarded routes.
//!
//! `require` is the single integration point between the authorization
//! pipeline and the routing layer: wrap an operation, name the permission it
//! needs, get back a guarded operation. The verified claim set travels to the
//! handler through request extensions (middleware → extractor handoff).

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::error::AppError;
use crate::services::auth::Authenticator;

/// Wrap `routes` so its handlers only run for requests carrying a verified
/// token that grants `permission`.
///
/// Each call site names its own permission; extraction and verification are
/// shared. Example:
/// ```ignore
/// .route("/drinks-detail", access::require(get(drinks_detail), &auth, "get:drinks-detail"))
/// ```
pub fn require<S>(
    routes: MethodRouter<S>,
    auth: &Arc<Authenticator>,
    permission: &'static str,
) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    // from_fn_with_state because the guard's state (authenticator + required
    // permission) is not the router's state.
    routes.layer(middleware::from_fn_with_state(
        (auth.clone(), permission),
        guard,
    ))
}

async fn guard(
    State((auth, permission)): State<(Arc<Authenticator>, &'static str)>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let claims = match auth.authorize(req.headers(), permission).await {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(code = err.code(), permission, "authorization failed");
            return Err(AppError::Auth(err));
        }
    };

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

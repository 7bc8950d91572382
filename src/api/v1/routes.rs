/*
 * Responsibility
 * - v1 URL structure
 * - each protected method router names the permission it requires at the
 *   call site; GET /drinks is the only public drinks endpoint
 */
use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, patch, post},
};

use crate::api::v1::handlers::{
    drinks::{create_drink, delete_drink, drinks_detail, edit_drink, list_drinks},
    health::health,
};
use crate::error::AppError;
use crate::middleware::auth::access;
use crate::services::auth::Authenticator;
use crate::state::AppState;

// Unknown paths and wrong methods go through the envelope too, like the
// handlers' own failures.
async fn not_found() -> AppError {
    AppError::not_found("resource")
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub fn routes(auth: &Arc<Authenticator>) -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route(
            "/drinks",
            get(list_drinks).merge(access::require(post(create_drink), auth, "post:drinks")),
        )
        .route(
            "/drinks-detail",
            access::require(get(drinks_detail), auth, "get:drinks-detail"),
        )
        .route(
            "/drinks/{drink_id}",
            access::require(patch(edit_drink), auth, "patch:drinks").merge(access::require(
                delete(delete_drink),
                auth,
                "delete:drinks",
            )),
        )
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
}

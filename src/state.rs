/*
 * Responsibility
 * - shared context attached to the Router (AppState)
 * - held by Clone (internals are Arc / cheap to clone)
 */
use std::sync::Arc;

use crate::services::auth::Authenticator;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub auth: Arc<Authenticator>,
}

impl AppState {
    pub fn new(db: sqlx::PgPool, auth: Arc<Authenticator>) -> Self {
        Self { db, auth }
    }
}

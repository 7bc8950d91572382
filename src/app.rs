/*
 * Responsibility
 * - Config loading → dependency construction → Router assembly
 * - middleware application (CORS / tracing / guards come pre-wired in routes)
 * - startup via axum::serve()
 */
use std::sync::Arc;
use std::{panic, process};

use anyhow::Result;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware;
use crate::services::auth::{Authenticator, JwksCache};
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,coffeeshop_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    // Keep the default hook as a fallback (prints to stderr with location).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Surface panics via tracing so they don't get lost when stderr is
        // hidden by the process supervisor.
        tracing::error!(?info, "panic");

        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let db = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;

    sqlx::migrate!().run(&db).await?;

    let jwks = JwksCache::new(config.auth_jwks_url.clone(), config.jwks_fetch_timeout)?;
    // Warm the key cache so the first guarded request does not pay the fetch.
    jwks.prefetch().await;

    let auth = Arc::new(Authenticator::new(
        jwks,
        &config.auth_issuer,
        &config.auth_audience,
        config.auth_algorithms.clone(),
        config.auth_leeway_seconds,
    ));

    Ok(AppState::new(db, auth))
}

fn build_router(state: AppState, config: &Config) -> Router {
    let app = Router::new()
        .merge(api::v1::routes(&state.auth))
        .with_state(state);

    let app = middleware::cors::apply(app, config);
    middleware::http::apply(app)
}

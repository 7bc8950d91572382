/*
 * Responsibility
 * - /drinks CRUD handlers
 * - permission enforcement happens in the route guard; handlers that need the
 *   verified claims (audit logging) take AuthClaims
 */
use axum::extract::State;

use crate::{
    api::v1::{
        dto::drinks::{
            CreateDrinkRequest, DeleteDrinkResponse, DrinkListResponse, DrinkLong, DrinkShort,
            UpdateDrinkRequest,
        },
        extractors::{AuthClaims, Json, Path},
    },
    error::AppError,
    repos::drink_repo::{self, DrinkRow},
    state::AppState,
};

fn long(row: DrinkRow) -> Result<DrinkLong, AppError> {
    DrinkLong::try_from(row).map_err(|err| {
        tracing::error!(error = %err, "stored recipe is not valid JSON");
        AppError::Internal
    })
}

fn short(row: DrinkRow) -> Result<DrinkShort, AppError> {
    DrinkShort::try_from(row).map_err(|err| {
        tracing::error!(error = %err, "stored recipe is not valid JSON");
        AppError::Internal
    })
}

/// GET /drinks. Public; short representation only.
pub async fn list_drinks(
    State(state): State<AppState>,
) -> Result<Json<DrinkListResponse<DrinkShort>>, AppError> {
    let rows = drink_repo::list(&state.db).await?;

    let mut drinks = Vec::with_capacity(rows.len());
    for row in rows {
        drinks.push(short(row)?);
    }

    Ok(Json(DrinkListResponse {
        success: true,
        drinks,
    }))
}

/// GET /drinks-detail. Requires `get:drinks-detail`; long representation.
pub async fn drinks_detail(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
) -> Result<Json<DrinkListResponse<DrinkLong>>, AppError> {
    let rows = drink_repo::list(&state.db).await?;
    if rows.is_empty() {
        return Err(AppError::bad_request("No drinks found in menu"));
    }

    tracing::debug!(subject = %claims.sub, "serving drink details");

    let mut drinks = Vec::with_capacity(rows.len());
    for row in rows {
        drinks.push(long(row)?);
    }

    Ok(Json(DrinkListResponse {
        success: true,
        drinks,
    }))
}

/// POST /drinks. Requires `post:drinks`.
pub async fn create_drink(
    State(state): State<AppState>,
    AuthClaims(claims): AuthClaims,
    Json(req): Json<CreateDrinkRequest>,
) -> Result<Json<DrinkListResponse<DrinkLong>>, AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let recipe =
        serde_json::to_string(&req.recipe.into_vec()).map_err(|_| AppError::Internal)?;
    let row = drink_repo::create(&state.db, &req.title, &recipe).await?;

    tracing::info!(subject = %claims.sub, drink_id = row.drink_id, "drink created");

    Ok(Json(DrinkListResponse {
        success: true,
        drinks: vec![long(row)?],
    }))
}

/// PATCH /drinks/{drink_id}. Requires `patch:drinks`; partial update.
pub async fn edit_drink(
    State(state): State<AppState>,
    Path(drink_id): Path<i64>,
    AuthClaims(claims): AuthClaims,
    Json(req): Json<UpdateDrinkRequest>,
) -> Result<Json<DrinkListResponse<DrinkLong>>, AppError> {
    req.validate().map_err(AppError::bad_request)?;

    let recipe = match req.recipe {
        Some(input) => {
            Some(serde_json::to_string(&input.into_vec()).map_err(|_| AppError::Internal)?)
        }
        None => None,
    };

    let row = drink_repo::update(&state.db, drink_id, req.title.as_deref(), recipe.as_deref())
        .await?
        .ok_or_else(|| AppError::not_found("drink"))?;

    tracing::info!(subject = %claims.sub, drink_id, "drink updated");

    Ok(Json(DrinkListResponse {
        success: true,
        drinks: vec![long(row)?],
    }))
}

/// DELETE /drinks/{drink_id}. Requires `delete:drinks`.
pub async fn delete_drink(
    State(state): State<AppState>,
    Path(drink_id): Path<i64>,
    AuthClaims(claims): AuthClaims,
) -> Result<Json<DeleteDrinkResponse>, AppError> {
    let deleted = drink_repo::delete(&state.db, drink_id).await?;
    if !deleted {
        return Err(AppError::not_found("drink"));
    }

    tracing::info!(subject = %claims.sub, drink_id, "drink deleted");

    Ok(Json(DeleteDrinkResponse {
        success: true,
        delete: drink_id,
    }))
}

/*
 * Responsibility
 * - drinks CRUD
 * - recipe is stored as a JSON string; parsing lives at the DTO boundary
 */
use sqlx::PgPool;

use super::error::RepoError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DrinkRow {
    #[sqlx(rename = "drinkId")]
    pub drink_id: i64,

    pub title: String,

    // JSON-encoded ingredient list
    pub recipe: String,
}

pub async fn list(pool: &PgPool) -> Result<Vec<DrinkRow>, RepoError> {
    sqlx::query_as::<_, DrinkRow>(
        r#"
        SELECT "drinkId", title, recipe
        FROM drinks
        ORDER BY "drinkId"
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(RepoError::from_sqlx)
}

pub async fn create(pool: &PgPool, title: &str, recipe: &str) -> Result<DrinkRow, RepoError> {
    sqlx::query_as::<_, DrinkRow>(
        r#"
        INSERT INTO drinks (title, recipe)
        VALUES ($1, $2)
        RETURNING "drinkId", title, recipe
        "#,
    )
    .bind(title)
    .bind(recipe)
    .fetch_one(pool)
    .await
    .map_err(RepoError::from_sqlx)
}

pub async fn update(
    pool: &PgPool,
    drink_id: i64,
    title: Option<&str>,
    recipe: Option<&str>,
) -> Result<Option<DrinkRow>, RepoError> {
    sqlx::query_as::<_, DrinkRow>(
        r#"
        UPDATE drinks
        SET
            title = COALESCE($2, title),
            recipe = COALESCE($3, recipe)
        WHERE "drinkId" = $1
        RETURNING "drinkId", title, recipe
        "#,
    )
    .bind(drink_id)
    .bind(title)
    .bind(recipe)
    .fetch_optional(pool)
    .await
    .map_err(RepoError::from_sqlx)
}

pub async fn delete(pool: &PgPool, drink_id: i64) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM drinks
        WHERE "drinkId" = $1
        "#,
    )
    .bind(drink_id)
    .execute(pool)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(result.rows_affected() > 0)
}

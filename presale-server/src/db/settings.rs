//! Per-shop settings (the chosen pre-sale location)

use sqlx::PgPool;

#[derive(Debug, sqlx::FromRow, serde::Serialize)]
pub struct Settings {
    pub shop: String,
    pub location_id: String,
    pub updated_at: i64,
}

pub async fn get(pool: &PgPool, shop: &str) -> Result<Option<Settings>, sqlx::Error> {
    sqlx::query_as("SELECT shop, location_id, updated_at FROM settings WHERE shop = $1")
        .bind(shop)
        .fetch_optional(pool)
        .await
}

pub async fn upsert(
    pool: &PgPool,
    shop: &str,
    location_id: &str,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO settings (shop, location_id, updated_at) VALUES ($1, $2, $3)
         ON CONFLICT (shop)
         DO UPDATE SET location_id = EXCLUDED.location_id, updated_at = EXCLUDED.updated_at",
    )
    .bind(shop)
    .bind(location_id)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

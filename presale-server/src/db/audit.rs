//! Audit log operations

use sqlx::PgPool;

/// Audit entry kinds, stored under their stable string form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    /// Pre-sale location changed
    Settings,
    /// Holds released without splitting
    Release,
    /// Holds released, at least one order split
    SplitRelease,
}

impl AuditAction {
    pub const fn as_db(&self) -> &'static str {
        match self {
            Self::Settings => "SETTINGS",
            Self::Release => "RELEASE",
            Self::SplitRelease => "SPLIT_RELEASE",
        }
    }
}

/// Write an audit log entry
pub async fn log(
    pool: &PgPool,
    shop: &str,
    action: AuditAction,
    description: &str,
    now: i64,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO audit_logs (shop, action, description, created_at) VALUES ($1, $2, $3, $4)",
    )
    .bind(shop)
    .bind(action.as_db())
    .bind(description)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

#[derive(Debug, sqlx::FromRow, serde::Serialize)]
pub struct AuditEntry {
    pub id: i64,
    pub action: String,
    pub description: String,
    pub created_at: i64,
}

/// Most recent entries for a shop, newest first
pub async fn recent(pool: &PgPool, shop: &str, limit: i32) -> Result<Vec<AuditEntry>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, action, description, created_at FROM audit_logs
         WHERE shop = $1 ORDER BY created_at DESC, id DESC LIMIT $2",
    )
    .bind(shop)
    .bind(limit)
    .fetch_all(pool)
    .await
}

//! Audit log endpoint

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use crate::db;
use crate::db::audit::AuditEntry;
use crate::state::AppState;

use super::ApiResult;

#[derive(Deserialize)]
pub struct AuditQuery {
    pub limit: Option<i32>,
}

/// GET /api/audit-log
pub async fn audit_log(
    State(state): State<AppState>,
    Query(query): Query<AuditQuery>,
) -> ApiResult<Vec<AuditEntry>> {
    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let entries = db::audit::recent(&state.pool, &state.shop, limit).await?;
    Ok(Json(entries))
}

//! Settings endpoints: pre-sale location configuration

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, ErrorCode};

use crate::db;
use crate::db::audit::AuditAction;
use crate::platform::Location;
use crate::state::AppState;

use super::{ActionResponse, ApiResult};

/// GET /api/locations
pub async fn list_locations(State(state): State<AppState>) -> ApiResult<Vec<Location>> {
    let locations = state.platform.locations().await?;
    Ok(Json(locations))
}

#[derive(Serialize)]
pub struct SettingsView {
    pub location_id: Option<String>,
    pub updated_at: Option<i64>,
}

/// GET /api/settings
pub async fn get_settings(State(state): State<AppState>) -> ApiResult<SettingsView> {
    let settings = db::settings::get(&state.pool, &state.shop).await?;
    Ok(Json(SettingsView {
        location_id: settings.as_ref().map(|s| s.location_id.clone()),
        updated_at: settings.map(|s| s.updated_at),
    }))
}

#[derive(Deserialize)]
pub struct SaveSettings {
    pub location_id: String,
}

/// PUT /api/settings
pub async fn save_settings(
    State(state): State<AppState>,
    Json(body): Json<SaveSettings>,
) -> ApiResult<ActionResponse> {
    let location_id = body.location_id.trim();
    if location_id.is_empty() {
        return Err(AppError::validation("location_id must not be empty").into());
    }

    // The chosen location must exist on the platform
    let locations = state.platform.locations().await?;
    let Some(location) = locations.iter().find(|l| l.id == location_id) else {
        return Err(AppError::new(ErrorCode::LocationUnknown)
            .with_detail("location_id", location_id)
            .into());
    };

    let now = shared::util::now_millis();
    db::settings::upsert(&state.pool, &state.shop, location_id, now).await?;

    let description = format!("Pre-sale location set to {} ({location_id})", location.name);
    if let Err(e) = db::audit::log(
        &state.pool,
        &state.shop,
        AuditAction::Settings,
        &description,
        now,
    )
    .await
    {
        tracing::error!(error = %e, "Failed to append audit entry for settings change");
    }

    Ok(Json(ActionResponse::success(format!(
        "Pre-sale location saved: {}",
        location.name
    ))))
}

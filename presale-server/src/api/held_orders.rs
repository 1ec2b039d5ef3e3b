//! Held-order listing endpoint

use axum::Json;
use axum::extract::State;

use crate::db;
use crate::holds::{self, HeldOrderView};
use crate::state::AppState;

use super::ApiResult;

/// GET /api/held-orders
///
/// Empty result when no pre-sale location is configured.
pub async fn list_held_orders(State(state): State<AppState>) -> ApiResult<Vec<HeldOrderView>> {
    let Some(settings) = db::settings::get(&state.pool, &state.shop).await? else {
        return Ok(Json(Vec::new()));
    };

    let orders = holds::held_orders(&state.platform, &settings.location_id).await?;
    Ok(Json(orders))
}

//! Release endpoints
//!
//! Both endpoints run the same reconciliation: `release` over an explicit
//! selection, `release-all` over everything currently held.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use crate::db;
use crate::holds::{self, ReleaseRequest};
use crate::state::AppState;

use super::{ActionResponse, ApiResult};

#[derive(Deserialize)]
pub struct ReleaseSelected {
    pub order_ids: Vec<String>,
    pub item_filter: Option<String>,
}

/// POST /api/release
pub async fn release_selected(
    State(state): State<AppState>,
    Json(body): Json<ReleaseSelected>,
) -> ApiResult<ActionResponse> {
    let Some(settings) = db::settings::get(&state.pool, &state.shop).await? else {
        return Ok(Json(ActionResponse::info("No pre-sale location configured")));
    };

    if body.order_ids.is_empty() {
        return Ok(Json(ActionResponse::info("No orders selected")));
    }

    run_release(&state, &settings.location_id, body.order_ids, body.item_filter).await
}

#[derive(Deserialize, Default)]
pub struct ReleaseAll {
    pub item_filter: Option<String>,
}

/// POST /api/release-all
pub async fn release_all(
    State(state): State<AppState>,
    Json(body): Json<ReleaseAll>,
) -> ApiResult<ActionResponse> {
    let Some(settings) = db::settings::get(&state.pool, &state.shop).await? else {
        return Ok(Json(ActionResponse::info("No pre-sale location configured")));
    };

    let order_ids: Vec<String> = holds::held_orders(&state.platform, &settings.location_id)
        .await?
        .into_iter()
        .map(|o| o.id)
        .collect();

    if order_ids.is_empty() {
        return Ok(Json(ActionResponse::info(
            "No orders are currently on hold",
        )));
    }

    run_release(&state, &settings.location_id, order_ids, body.item_filter).await
}

async fn run_release(
    state: &AppState,
    location_id: &str,
    order_ids: Vec<String>,
    item_filter: Option<String>,
) -> ApiResult<ActionResponse> {
    let request = ReleaseRequest {
        order_ids,
        item_filter,
    };

    let outcome = holds::release_orders(
        &state.platform,
        location_id,
        &request,
        state.release_continue_on_error,
    )
    .await?;

    holds::finalize_release(
        &state.pool,
        &state.platform,
        &state.shop,
        location_id,
        request.item_filter.as_deref(),
        &outcome,
    )
    .await?;

    if outcome.released == 0 {
        let message = if outcome.failed > 0 {
            format!("No orders released, {} failed", outcome.failed)
        } else {
            "No matching held orders to release".to_string()
        };
        return Ok(Json(ActionResponse::info(message).with_counts(0, 0)));
    }

    let mut message = format!("Released {} order(s)", outcome.released);
    if outcome.split > 0 {
        message.push_str(&format!(", {} required a split", outcome.split));
    }
    if outcome.failed > 0 {
        message.push_str(&format!(", {} failed", outcome.failed));
    }

    Ok(Json(
        ActionResponse::success(message).with_counts(outcome.released, outcome.split),
    ))
}

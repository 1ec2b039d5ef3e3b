//! API routes for presale-server

mod audit_log;
mod auth;
mod health;
mod held_orders;
mod release;
mod settings;
mod webhook;

use axum::routing::{get, post};
use axum::{Router, middleware};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::error::ServiceError;
use crate::state::AppState;

pub type ApiResult<T> = Result<axum::Json<T>, ServiceError>;

/// Outcome of an operator action: a status plus a human-readable message
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    /// "success" when something was changed, "info" otherwise
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub released: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split: Option<u32>,
}

impl ActionResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
            released: None,
            split: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            status: "info",
            message: message.into(),
            released: None,
            split: None,
        }
    }

    pub fn with_counts(mut self, released: u32, split: u32) -> Self {
        self.released = Some(released);
        self.split = Some(split);
        self
    }
}

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Staff actions (bearer token)
    let staff = Router::new()
        .route("/api/locations", get(settings::list_locations))
        .route(
            "/api/settings",
            get(settings::get_settings).put(settings::save_settings),
        )
        .route("/api/held-orders", get(held_orders::list_held_orders))
        .route("/api/release", post(release::release_selected))
        .route("/api/release-all", post(release::release_all))
        .route("/api/audit-log", get(audit_log::audit_log))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::staff_auth_middleware,
        ));

    // Order-creation webhook (signature-verified, raw body)
    let webhook = Router::new().route(
        "/webhooks/orders/create",
        post(webhook::handle_order_created),
    );

    Router::new()
        .route("/health", get(health::health_check))
        .merge(staff)
        .merge(webhook)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

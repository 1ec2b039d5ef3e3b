//! Order-creation ingestion: hold new pre-sale fulfillment orders

use sqlx::PgPool;

use crate::db;
use crate::platform::PlatformClient;

use super::{HOLD_NOTE, HOLD_REASON, MARKER_TAG};

/// Hold every open fulfillment order of `order_id` assigned to the
/// configured pre-sale location, then tag the order.
///
/// Never fails the webhook: errors are logged and dropped so the platform is
/// not made to redeliver over business-logic failures.
pub async fn apply_presale_hold(
    pool: &PgPool,
    platform: &PlatformClient,
    shop: &str,
    order_id: &str,
) {
    let location_id = match db::settings::get(pool, shop).await {
        Ok(Some(settings)) => settings.location_id,
        Ok(None) => {
            tracing::debug!(shop = shop, "No pre-sale location configured, ignoring order");
            return;
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read settings for webhook");
            return;
        }
    };

    let order = match platform.order_holds(order_id).await {
        Ok(Some(order)) => order,
        Ok(None) => {
            tracing::warn!(order_id = %order_id, "Webhook order not found on platform");
            return;
        }
        Err(e) => {
            tracing::error!(order_id = %order_id, error = %e, "Failed to fetch order for webhook");
            return;
        }
    };

    let mut held = 0u32;
    for fo in &order.fulfillment_orders.nodes {
        if !(fo.is_open() && fo.is_assigned_to(&location_id)) {
            continue;
        }
        match platform
            .hold_fulfillment_order(&fo.id, HOLD_REASON, HOLD_NOTE)
            .await
        {
            Ok(()) => held += 1,
            Err(e) => {
                tracing::error!(
                    fulfillment_order_id = %fo.id,
                    error = %e,
                    "Failed to hold fulfillment order"
                );
            }
        }
    }

    if held > 0 {
        if let Err(e) = platform.add_tag(&order.id, MARKER_TAG).await {
            tracing::error!(order_id = %order.id, error = %e, "Failed to tag held order");
        }
        tracing::info!(order_name = %order.name, held = held, "Applied pre-sale hold");
    }
}

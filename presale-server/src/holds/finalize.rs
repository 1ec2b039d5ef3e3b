//! Tag cleanup and audit append after a release pass
//!
//! Each touched order is re-queried before its tag is removed: a hold
//! applied concurrently (e.g. by the order-creation webhook) keeps the tag
//! in place.

use sqlx::PgPool;

use crate::db::audit::{self, AuditAction};
use crate::platform::{PlatformClient, PlatformError};

use super::MARKER_TAG;
use super::release::ReleaseOutcome;

/// Remove the marker tag from every released order with no remaining hold at
/// the configured location, then append one audit entry for the batch.
pub async fn finalize_release(
    pool: &PgPool,
    platform: &PlatformClient,
    shop: &str,
    location_id: &str,
    item_filter: Option<&str>,
    outcome: &ReleaseOutcome,
) -> Result<(), PlatformError> {
    for order_id in &outcome.order_ids {
        let Some(order) = platform.order_holds(order_id).await? else {
            continue;
        };

        let still_held = order
            .fulfillment_orders
            .nodes
            .iter()
            .any(|fo| fo.is_on_hold() && fo.is_assigned_to(location_id));

        if !still_held {
            platform.remove_tag(order_id, MARKER_TAG).await?;
        }
    }

    if outcome.released > 0 {
        let action = if outcome.split > 0 {
            AuditAction::SplitRelease
        } else {
            AuditAction::Release
        };
        let description = compose_description(outcome, item_filter);
        if let Err(e) = audit::log(
            pool,
            shop,
            action,
            &description,
            shared::util::now_millis(),
        )
        .await
        {
            tracing::error!(error = %e, "Failed to append audit entry for release");
        }
    }

    Ok(())
}

/// Human-readable summary of one release batch
pub fn compose_description(outcome: &ReleaseOutcome, item_filter: Option<&str>) -> String {
    let mut description = format!("Released {} order(s)", outcome.released);
    if outcome.split > 0 {
        description.push_str(&format!(" ({} split)", outcome.split));
    }
    if let Some(filter) = item_filter {
        description.push_str(&format!(" matching \"{filter}\""));
    }
    if !outcome.order_names.is_empty() {
        description.push_str(": ");
        description.push_str(&outcome.order_names.join(", "));
    }
    description
}

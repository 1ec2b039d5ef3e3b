//! Release-reconciliation engine
//!
//! Decides per order whether a release is full or partial, issues the
//! release/split/re-hold mutations in sequence, and tracks the batch
//! outcome. Always acts on a fresh read of the fulfillment orders, never on
//! the snapshot the operator was looking at.

use crate::platform::{
    FulfillmentOrder, FulfillmentOrderLineItem, PlatformClient, PlatformError, SplitLineItem,
};

use super::{HOLD_NOTE, HOLD_REASON};

/// Release action requested by an operator
#[derive(Debug, Clone)]
pub struct ReleaseRequest {
    /// Orders to reconcile
    pub order_ids: Vec<String>,
    /// Case-insensitive substring match on line-item titles; absent or blank
    /// releases every held item
    pub item_filter: Option<String>,
}

/// What one reconciliation pass did
#[derive(Debug, Default)]
pub struct ReleaseOutcome {
    /// Orders whose holds were released
    pub released: u32,
    /// Subset of released orders that required a split
    pub split: u32,
    /// Display names of released orders
    pub order_names: Vec<String>,
    /// Ids of released orders, for the tag finalizer
    pub order_ids: Vec<String>,
    /// Orders skipped because a platform call failed (continue-on-error mode)
    pub failed: u32,
}

/// Per-order decision over a fresh fulfillment-order read
#[derive(Debug, PartialEq)]
pub enum ReleasePlan {
    /// Nothing to do: the filter matched no line item
    Skip,
    /// Every line item matches: release the hold outright
    Full,
    /// A proper subset matches: split it out, re-hold the remainder
    Partial { release: Vec<SplitLineItem> },
}

/// Blank or whitespace-only filters mean "no filter"
pub fn normalize_filter(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|f| !f.is_empty())
}

fn matches_filter(item: &FulfillmentOrderLineItem, filter: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(f) => item.title().to_lowercase().contains(&f.to_lowercase()),
    }
}

/// Partition a held fulfillment order's line items against the filter
pub fn plan_release(fulfillment_order: &FulfillmentOrder, filter: Option<&str>) -> ReleasePlan {
    let items = &fulfillment_order.line_items.nodes;
    let matched: Vec<&FulfillmentOrderLineItem> = items
        .iter()
        .filter(|li| matches_filter(li, filter))
        .collect();

    if matched.is_empty() {
        return ReleasePlan::Skip;
    }
    if matched.len() == items.len() {
        return ReleasePlan::Full;
    }
    ReleasePlan::Partial {
        release: matched
            .iter()
            .map(|li| SplitLineItem {
                id: li.id.clone(),
                quantity: li.remaining_quantity,
            })
            .collect(),
    }
}

/// Reconcile every requested order, one at a time.
///
/// Transport errors abort the batch unless `continue_on_error` is set;
/// either way, releases already completed stay completed.
pub async fn release_orders(
    platform: &PlatformClient,
    location_id: &str,
    request: &ReleaseRequest,
    continue_on_error: bool,
) -> Result<ReleaseOutcome, PlatformError> {
    let filter = normalize_filter(request.item_filter.as_deref());
    let mut outcome = ReleaseOutcome::default();

    for order_id in &request.order_ids {
        match release_one(platform, location_id, order_id, filter).await {
            Ok(Some(released)) => {
                outcome.released += 1;
                if released.split {
                    outcome.split += 1;
                }
                outcome.order_names.push(released.name);
                outcome.order_ids.push(order_id.clone());
            }
            Ok(None) => {}
            Err(e) if continue_on_error => {
                tracing::error!(
                    order_id = %order_id,
                    error = %e,
                    "Release failed, continuing with remaining orders"
                );
                outcome.failed += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(outcome)
}

struct ReleasedOrder {
    name: String,
    split: bool,
}

/// Release one order against a fresh read. `None` means the order was
/// skipped: already released, held elsewhere, or the filter matched nothing.
async fn release_one(
    platform: &PlatformClient,
    location_id: &str,
    order_id: &str,
    filter: Option<&str>,
) -> Result<Option<ReleasedOrder>, PlatformError> {
    let Some(order) = platform.order_holds(order_id).await? else {
        tracing::warn!(order_id = %order_id, "Order no longer exists, skipping");
        return Ok(None);
    };

    let Some(held) = order
        .fulfillment_orders
        .nodes
        .iter()
        .find(|fo| fo.is_on_hold() && fo.is_assigned_to(location_id))
    else {
        return Ok(None);
    };

    match plan_release(held, filter) {
        ReleasePlan::Skip => Ok(None),
        ReleasePlan::Full => {
            platform.release_hold(&held.id).await?;
            tracing::info!(order_name = %order.name, "Released hold");
            Ok(Some(ReleasedOrder {
                name: order.name.clone(),
                split: false,
            }))
        }
        ReleasePlan::Partial { release } => {
            platform.release_hold(&held.id).await?;

            match platform.split_fulfillment_order(&held.id, &release).await {
                Ok(()) => {}
                Err(PlatformError::Rejected(errors)) => {
                    // Split refused: put the hold back so the order is not
                    // left unlocked with nothing shipped
                    tracing::warn!(
                        order_id = %order_id,
                        errors = ?errors,
                        "Split rejected, re-applying hold"
                    );
                    platform
                        .hold_fulfillment_order(&held.id, HOLD_REASON, HOLD_NOTE)
                        .await?;
                    return Ok(None);
                }
                Err(e) => return Err(e),
            }

            // The split-out fulfillment order ships released; the original
            // keeps only the retained items and goes back on hold
            platform
                .hold_fulfillment_order(&held.id, HOLD_REASON, HOLD_NOTE)
                .await?;
            tracing::info!(
                order_name = %order.name,
                released_items = release.len(),
                "Split and released hold"
            );
            Ok(Some(ReleasedOrder {
                name: order.name.clone(),
                split: true,
            }))
        }
    }
}

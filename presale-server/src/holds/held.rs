//! Held-order query adapter

use serde::Serialize;

use crate::platform::{FulfillmentOrder, Order, PlatformClient, PlatformError};

/// Display projection of an order currently held at the pre-sale location
#[derive(Debug, Clone, Serialize)]
pub struct HeldOrderView {
    pub id: String,
    pub name: String,
    pub created_at: String,
    /// Concatenated titles of the line items currently under hold
    pub held_items: String,
}

/// Orders with at least one fulfillment order on hold at `location_id`.
///
/// Reads a single bounded page of unfulfilled orders; shops with more open
/// orders than the page size see a truncated view.
pub async fn held_orders(
    platform: &PlatformClient,
    location_id: &str,
) -> Result<Vec<HeldOrderView>, PlatformError> {
    let orders = platform.unfulfilled_orders().await?;
    Ok(orders
        .iter()
        .filter_map(|order| project(order, location_id))
        .collect())
}

fn project(order: &Order, location_id: &str) -> Option<HeldOrderView> {
    let held: Vec<&FulfillmentOrder> = order
        .fulfillment_orders
        .nodes
        .iter()
        .filter(|fo| fo.is_on_hold() && fo.is_assigned_to(location_id))
        .collect();

    if held.is_empty() {
        return None;
    }

    let titles: Vec<&str> = held
        .iter()
        .flat_map(|fo| fo.line_items.nodes.iter())
        .map(|li| li.title())
        .filter(|t| !t.is_empty())
        .collect();

    Some(HeldOrderView {
        id: order.id.clone(),
        name: order.name.clone(),
        created_at: order.created_at.clone(),
        held_items: titles.join(", "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{
        AssignedLocation, Connection, FulfillmentOrderLineItem, LocationRef, status,
    };

    const LOCATION: &str = "gid://platform/Location/7";

    fn line_item(id: &str, title: &str, qty: i64) -> FulfillmentOrderLineItem {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "remainingQuantity": qty,
            "lineItem": {"title": title},
        }))
        .unwrap()
    }

    fn fulfillment_order(
        id: &str,
        st: &str,
        location_id: Option<&str>,
        items: Vec<FulfillmentOrderLineItem>,
    ) -> FulfillmentOrder {
        FulfillmentOrder {
            id: id.to_string(),
            status: st.to_string(),
            assigned_location: AssignedLocation {
                location: location_id.map(|id| LocationRef { id: id.to_string() }),
            },
            line_items: Connection { nodes: items },
        }
    }

    fn order(name: &str, fulfillment_orders: Vec<FulfillmentOrder>) -> Order {
        Order {
            id: format!("gid://platform/Order/{name}"),
            name: name.to_string(),
            created_at: "2025-11-02T10:00:00Z".to_string(),
            tags: Vec::new(),
            fulfillment_orders: Connection {
                nodes: fulfillment_orders,
            },
        }
    }

    #[test]
    fn test_projects_order_held_at_location() {
        let o = order(
            "#1001",
            vec![fulfillment_order(
                "fo1",
                status::ON_HOLD,
                Some(LOCATION),
                vec![line_item("li1", "Widget", 1), line_item("li2", "Gadget", 2)],
            )],
        );

        let view = project(&o, LOCATION).unwrap();
        assert_eq!(view.name, "#1001");
        assert_eq!(view.held_items, "Widget, Gadget");
    }

    #[test]
    fn test_skips_order_held_elsewhere() {
        let o = order(
            "#1002",
            vec![fulfillment_order(
                "fo1",
                status::ON_HOLD,
                Some("gid://platform/Location/8"),
                vec![line_item("li1", "Widget", 1)],
            )],
        );
        assert!(project(&o, LOCATION).is_none());
    }

    #[test]
    fn test_skips_open_fulfillment_order_at_location() {
        let o = order(
            "#1003",
            vec![fulfillment_order(
                "fo1",
                status::OPEN,
                Some(LOCATION),
                vec![line_item("li1", "Widget", 1)],
            )],
        );
        assert!(project(&o, LOCATION).is_none());
    }

    #[test]
    fn test_only_held_items_listed() {
        let o = order(
            "#1004",
            vec![
                fulfillment_order(
                    "fo1",
                    status::ON_HOLD,
                    Some(LOCATION),
                    vec![line_item("li1", "Widget", 1)],
                ),
                fulfillment_order(
                    "fo2",
                    status::OPEN,
                    Some(LOCATION),
                    vec![line_item("li2", "Gadget", 1)],
                ),
            ],
        );

        let view = project(&o, LOCATION).unwrap();
        assert_eq!(view.held_items, "Widget");
    }
}

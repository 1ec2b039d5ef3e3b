//! Read-side platform queries
//!
//! Every flow re-reads the entities it is about to act on; nothing here is
//! cached.

use serde::Deserialize;
use serde_json::json;

use super::types::{Connection, Location, Order};
use super::{PlatformClient, PlatformError};

/// Single page fetched per order listing; larger shops see a truncated view
const ORDER_PAGE_SIZE: u32 = 50;
const LOCATION_PAGE_SIZE: u32 = 50;

/// Shared selection for fulfillment orders and their line items
const FULFILLMENT_ORDER_FIELDS: &str = "
    id
    status
    assignedLocation { location { id } }
    lineItems(first: 50) {
        nodes {
            id
            remainingQuantity
            lineItem { title }
        }
    }
";

impl PlatformClient {
    /// List the shop's inventory locations
    pub async fn locations(&self) -> Result<Vec<Location>, PlatformError> {
        #[derive(Deserialize)]
        struct Data {
            locations: Connection<Location>,
        }

        let query = "
            query Locations($first: Int!) {
                locations(first: $first) {
                    nodes { id name }
                }
            }
        ";

        let data: Data = self
            .graphql(query, json!({ "first": LOCATION_PAGE_SIZE }))
            .await?;
        Ok(data.locations.nodes)
    }

    /// One bounded page of unfulfilled orders with their fulfillment orders
    pub async fn unfulfilled_orders(&self) -> Result<Vec<Order>, PlatformError> {
        #[derive(Deserialize)]
        struct Data {
            orders: Connection<Order>,
        }

        let query = format!(
            "
            query UnfulfilledOrders($first: Int!, $search: String!) {{
                orders(first: $first, query: $search) {{
                    nodes {{
                        id
                        name
                        createdAt
                        tags
                        fulfillmentOrders(first: 10) {{
                            nodes {{ {FULFILLMENT_ORDER_FIELDS} }}
                        }}
                    }}
                }}
            }}
            "
        );

        let data: Data = self
            .graphql(
                &query,
                json!({
                    "first": ORDER_PAGE_SIZE,
                    "search": "fulfillment_status:unfulfilled",
                }),
            )
            .await?;
        Ok(data.orders.nodes)
    }

    /// Fresh single-order read: name, tags, and current fulfillment orders.
    ///
    /// Returns `None` when the order no longer exists.
    pub async fn order_holds(&self, order_id: &str) -> Result<Option<Order>, PlatformError> {
        #[derive(Deserialize)]
        struct Data {
            order: Option<Order>,
        }

        let query = format!(
            "
            query OrderHolds($id: ID!) {{
                order: node(id: $id) {{
                    ... on Order {{
                        id
                        name
                        createdAt
                        tags
                        fulfillmentOrders(first: 10) {{
                            nodes {{ {FULFILLMENT_ORDER_FIELDS} }}
                        }}
                    }}
                }}
            }}
            "
        );

        let data: Data = self.graphql(&query, json!({ "id": order_id })).await?;
        Ok(data.order)
    }
}

//! Typed projections of the platform entities this service reads
//!
//! These mirror only the fields the hold flows inspect; everything else the
//! platform returns is ignored at decode time.

use serde::{Deserialize, Serialize};

/// Fulfillment-order lifecycle states this service inspects
pub mod status {
    pub const OPEN: &str = "OPEN";
    pub const ON_HOLD: &str = "ON_HOLD";
}

/// GraphQL connection wrapper (`{ "nodes": [...] }`)
#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

/// Inventory location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
}

/// Order with its nested fulfillment orders
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    /// Display name, e.g. "#1001"
    pub name: String,
    pub created_at: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub fulfillment_orders: Connection<FulfillmentOrder>,
}

/// One shipment unit of an order, assigned to a single location
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentOrder {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub assigned_location: AssignedLocation,
    #[serde(default)]
    pub line_items: Connection<FulfillmentOrderLineItem>,
}

impl FulfillmentOrder {
    pub fn is_on_hold(&self) -> bool {
        self.status == status::ON_HOLD
    }

    pub fn is_open(&self) -> bool {
        self.status == status::OPEN
    }

    pub fn is_assigned_to(&self, location_id: &str) -> bool {
        self.assigned_location
            .location
            .as_ref()
            .is_some_and(|l| l.id == location_id)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignedLocation {
    pub location: Option<LocationRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationRef {
    pub id: String,
}

/// Line item within a fulfillment order
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentOrderLineItem {
    pub id: String,
    pub remaining_quantity: i64,
    /// Absent when the underlying product was deleted
    pub line_item: Option<LineItemRef>,
}

impl FulfillmentOrderLineItem {
    pub fn title(&self) -> &str {
        self.line_item.as_ref().map(|l| l.title.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineItemRef {
    pub title: String,
}

/// Line item + quantity to move into a new fulfillment order
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SplitLineItem {
    pub id: String,
    pub quantity: i64,
}

/// Structured mutation rejection reported by the platform
#[derive(Debug, Clone, Deserialize)]
pub struct UserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

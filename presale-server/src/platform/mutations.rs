//! Write-side platform mutations
//!
//! Every mutation surfaces platform `userErrors` as
//! [`PlatformError::Rejected`] so callers can tell a rejected change from a
//! failed request.

use serde::Deserialize;
use serde_json::json;

use super::types::{SplitLineItem, UserError};
use super::{PlatformClient, PlatformError};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MutationStatus {
    #[serde(default)]
    user_errors: Vec<UserError>,
}

impl MutationStatus {
    fn into_result(self) -> Result<(), PlatformError> {
        if self.user_errors.is_empty() {
            Ok(())
        } else {
            Err(PlatformError::Rejected(self.user_errors))
        }
    }
}

impl PlatformClient {
    /// Place a hold (reason code + note) on a fulfillment order
    pub async fn hold_fulfillment_order(
        &self,
        fulfillment_order_id: &str,
        reason: &str,
        note: &str,
    ) -> Result<(), PlatformError> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            fulfillment_order_hold: Option<MutationStatus>,
        }

        let query = "
            mutation HoldFulfillmentOrder($id: ID!, $reason: FulfillmentHoldReason!, $note: String) {
                fulfillmentOrderHold(id: $id, fulfillmentHold: { reason: $reason, reasonNotes: $note }) {
                    userErrors { field message }
                }
            }
        ";

        let data: Data = self
            .graphql(
                query,
                json!({ "id": fulfillment_order_id, "reason": reason, "note": note }),
            )
            .await?;
        data.fulfillment_order_hold
            .ok_or(PlatformError::Missing("fulfillmentOrderHold"))?
            .into_result()
    }

    /// Release the hold on a fulfillment order
    pub async fn release_hold(&self, fulfillment_order_id: &str) -> Result<(), PlatformError> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            fulfillment_order_release_hold: Option<MutationStatus>,
        }

        let query = "
            mutation ReleaseFulfillmentOrderHold($id: ID!) {
                fulfillmentOrderReleaseHold(id: $id) {
                    userErrors { field message }
                }
            }
        ";

        let data: Data = self
            .graphql(query, json!({ "id": fulfillment_order_id }))
            .await?;
        data.fulfillment_order_release_hold
            .ok_or(PlatformError::Missing("fulfillmentOrderReleaseHold"))?
            .into_result()
    }

    /// Move the given line items (with quantities) out of a fulfillment order
    /// into a newly created one
    pub async fn split_fulfillment_order(
        &self,
        fulfillment_order_id: &str,
        line_items: &[SplitLineItem],
    ) -> Result<(), PlatformError> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            fulfillment_order_split: Option<MutationStatus>,
        }

        let query = "
            mutation SplitFulfillmentOrder($splits: [FulfillmentOrderSplitInput!]!) {
                fulfillmentOrderSplit(fulfillmentOrderSplits: $splits) {
                    userErrors { field message }
                }
            }
        ";

        let splits = json!([{
            "fulfillmentOrderId": fulfillment_order_id,
            "fulfillmentOrderLineItems": line_items,
        }]);

        let data: Data = self.graphql(query, json!({ "splits": splits })).await?;
        data.fulfillment_order_split
            .ok_or(PlatformError::Missing("fulfillmentOrderSplit"))?
            .into_result()
    }

    /// Add a tag to an order
    pub async fn add_tag(&self, order_id: &str, tag: &str) -> Result<(), PlatformError> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            tags_add: Option<MutationStatus>,
        }

        let query = "
            mutation AddTag($id: ID!, $tags: [String!]!) {
                tagsAdd(id: $id, tags: $tags) {
                    userErrors { field message }
                }
            }
        ";

        let data: Data = self
            .graphql(query, json!({ "id": order_id, "tags": [tag] }))
            .await?;
        data.tags_add
            .ok_or(PlatformError::Missing("tagsAdd"))?
            .into_result()
    }

    /// Remove a tag from an order
    pub async fn remove_tag(&self, order_id: &str, tag: &str) -> Result<(), PlatformError> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Data {
            tags_remove: Option<MutationStatus>,
        }

        let query = "
            mutation RemoveTag($id: ID!, $tags: [String!]!) {
                tagsRemove(id: $id, tags: $tags) {
                    userErrors { field message }
                }
            }
        ";

        let data: Data = self
            .graphql(query, json!({ "id": order_id, "tags": [tag] }))
            .await?;
        data.tags_remove
            .ok_or(PlatformError::Missing("tagsRemove"))?
            .into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_status_ok_when_no_user_errors() {
        let status: MutationStatus = serde_json::from_str(r#"{"userErrors": []}"#).unwrap();
        assert!(status.into_result().is_ok());
    }

    #[test]
    fn test_mutation_status_rejected_on_user_errors() {
        let status: MutationStatus = serde_json::from_str(
            r#"{"userErrors": [{"field": ["id"], "message": "Fulfillment order is not held"}]}"#,
        )
        .unwrap();

        match status.into_result() {
            Err(PlatformError::Rejected(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].message, "Fulfillment order is not held");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_split_line_items_serialize_shape() {
        let items = vec![SplitLineItem {
            id: "gid://platform/FulfillmentOrderLineItem/111".into(),
            quantity: 2,
        }];
        let value = serde_json::to_value(&items).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{"id": "gid://platform/FulfillmentOrderLineItem/111", "quantity": 2}])
        );
    }
}

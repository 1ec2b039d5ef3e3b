//! Commerce-platform admin API adapter (GraphQL over HTTP)
//!
//! All order, fulfillment-order and location state lives on the platform;
//! this module is the only place that talks to it. Queries and mutations are
//! thin typed wrappers over a single `graphql` entry point.

mod mutations;
mod queries;
mod types;

pub use types::{
    AssignedLocation, Connection, FulfillmentOrder, FulfillmentOrderLineItem, Location,
    LocationRef, Order, SplitLineItem, UserError, status,
};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors from the platform adapter
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// Transport-level failure (network, TLS, non-2xx, body decode)
    #[error("platform request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Top-level GraphQL errors
    #[error("platform returned errors: {0}")]
    Graph(String),
    /// Response decoded but an expected field was absent
    #[error("platform response missing {0}")]
    Missing(&'static str),
    /// Mutation-level userErrors: the platform accepted the request but
    /// rejected the change
    #[error("platform rejected mutation: {}", join_messages(.0))]
    Rejected(Vec<UserError>),
}

fn join_messages(errors: &[UserError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Typed client for the platform admin GraphQL endpoint
#[derive(Clone)]
pub struct PlatformClient {
    http: reqwest::Client,
    endpoint: String,
    access_token: String,
}

#[derive(Deserialize)]
struct GraphResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphError>>,
}

#[derive(Deserialize)]
struct GraphError {
    message: String,
}

impl PlatformClient {
    pub fn new(endpoint: &str, access_token: &str) -> Result<Self, PlatformError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.to_string(),
            access_token: access_token.to_string(),
        })
    }

    /// POST one GraphQL document and decode the typed `data` payload
    pub(crate) async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, PlatformError> {
        let body = serde_json::json!({ "query": query, "variables": variables });

        let resp: GraphResponse<T> = self
            .http
            .post(&self.endpoint)
            .header("X-Access-Token", &self.access_token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(errors) = resp.errors
            && !errors.is_empty()
        {
            let joined = errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(PlatformError::Graph(joined));
        }

        resp.data.ok_or(PlatformError::Missing("data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_display_joins_messages() {
        let err = PlatformError::Rejected(vec![
            UserError {
                field: None,
                message: "first".into(),
            },
            UserError {
                field: None,
                message: "second".into(),
            },
        ]);
        assert_eq!(
            format!("{err}"),
            "platform rejected mutation: first; second"
        );
    }

    #[test]
    fn test_graph_response_decodes_errors() {
        let raw = r#"{"data": null, "errors": [{"message": "Throttled"}]}"#;
        let resp: GraphResponse<serde_json::Value> = serde_json::from_str(raw).unwrap();
        assert!(resp.data.is_none());
        assert_eq!(resp.errors.unwrap()[0].message, "Throttled");
    }
}

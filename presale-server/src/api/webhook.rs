//! Order-creation webhook handler
//!
//! POST /webhooks/orders/create takes the raw body for signature verification.
//! After a valid signature the platform always gets a 200: business-logic
//! failures must not trigger redelivery.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::db;
use crate::holds;
use crate::state::AppState;

/// Header carrying the base64 HMAC-SHA256 digest of the raw body
const SIGNATURE_HEADER: &str = "x-webhook-hmac-sha256";
/// Header carrying the unique delivery id (replay dedup)
const DELIVERY_ID_HEADER: &str = "x-webhook-delivery-id";

const TOPIC_ORDERS_CREATE: &str = "orders/create";

/// Handle an incoming order-creation webhook
pub async fn handle_order_created(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    // 1. Signature
    let signature = match headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok()) {
        Some(s) => s,
        None => {
            tracing::warn!("Missing webhook signature header");
            return StatusCode::UNAUTHORIZED;
        }
    };
    if let Err(e) = verify_webhook_signature(&body, signature, &state.webhook_secret) {
        tracing::warn!(error = e, "Webhook signature verification failed");
        return StatusCode::UNAUTHORIZED;
    }

    // 2. Parse payload
    let payload: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(%e, "Failed to parse webhook JSON");
            return StatusCode::OK;
        }
    };

    let order_id = match payload["admin_graphql_api_id"].as_str() {
        Some(id) => id.to_string(),
        None => {
            tracing::warn!("Webhook payload missing order id");
            return StatusCode::OK;
        }
    };

    // 3. Dedup replayed deliveries (fail open: a DB error skips the check,
    //    not the hold)
    if let Some(delivery_id) = headers
        .get(DELIVERY_ID_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        match db::webhook_events::record(
            &state.pool,
            delivery_id,
            TOPIC_ORDERS_CREATE,
            shared::util::now_millis(),
        )
        .await
        {
            Ok(true) => {}
            Ok(false) => {
                tracing::info!(delivery_id = delivery_id, "Duplicate webhook delivery, skipping");
                return StatusCode::OK;
            }
            Err(e) => {
                tracing::error!(%e, "DB error recording webhook delivery");
            }
        }
    }

    tracing::info!(order_id = %order_id, "Received order-creation webhook");

    // 4. Apply holds; the outcome never affects the response
    holds::apply_presale_hold(&state.pool, &state.platform, &state.shop, &order_id).await;

    StatusCode::OK
}

/// Verify the webhook HMAC-SHA256 signature (base64 digest of the raw body)
pub fn verify_webhook_signature(
    payload: &[u8],
    signature_b64: &str,
    secret: &str,
) -> Result<(), &'static str> {
    let expected = base64::engine::general_purpose::STANDARD
        .decode(signature_b64)
        .map_err(|_| "Invalid signature base64")?;

    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).map_err(|_| "HMAC key error")?;
    mac.update(payload);

    // Constant-time comparison via hmac::verify_slice
    mac.verify_slice(&expected)
        .map_err(|_| "Webhook signature mismatch")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(payload: &[u8], secret: &str) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(payload);
        base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes())
    }

    #[test]
    fn test_valid_signature() {
        let payload = br#"{"admin_graphql_api_id": "gid://platform/Order/1"}"#;
        let signature = sign(payload, "shhh");
        assert!(verify_webhook_signature(payload, &signature, "shhh").is_ok());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let payload = br#"{"admin_graphql_api_id": "gid://platform/Order/1"}"#;
        let signature = sign(payload, "shhh");
        assert_eq!(
            verify_webhook_signature(payload, &signature, "other"),
            Err("Webhook signature mismatch")
        );
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let payload = br#"{"admin_graphql_api_id": "gid://platform/Order/1"}"#;
        let signature = sign(payload, "shhh");
        let tampered = br#"{"admin_graphql_api_id": "gid://platform/Order/2"}"#;
        assert!(verify_webhook_signature(tampered, &signature, "shhh").is_err());
    }

    #[test]
    fn test_garbage_signature_rejected() {
        let payload = b"{}";
        assert_eq!(
            verify_webhook_signature(payload, "not-base64!!!", "shhh"),
            Err("Invalid signature base64")
        );
    }
}

//! Processed-webhook bookkeeping (delivery dedup)

use sqlx::PgPool;

/// Record a delivery id; `false` means the delivery was already processed.
///
/// Insert-first with ON CONFLICT DO NOTHING, so there is no check-then-act
/// window between concurrent deliveries of the same event.
pub async fn record(
    pool: &PgPool,
    event_id: &str,
    topic: &str,
    now: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "INSERT INTO processed_webhook_events (event_id, topic, processed_at)
         VALUES ($1, $2, $3) ON CONFLICT DO NOTHING",
    )
    .bind(event_id)
    .bind(topic)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{BidActivity, RecordActivityRequest};

/// Append one bid event with a server-assigned timestamp. Rows are never
/// updated or deleted; duplicates per txHash are accepted (cosmetic feed).
pub async fn insert_activity(
    pool: &PgPool,
    req: &RecordActivityRequest,
) -> anyhow::Result<Uuid> {
    let agent_details = req
        .agent_details
        .as_ref()
        .map(serde_json::to_value)
        .transpose()?;

    let row: (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO pot_activity
            (round, tx_hash, bidder, amount_wei, amount_eth, agent_id, agent_details, block_number)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id
        "#,
    )
    .bind(req.round as i32)
    .bind(&req.tx_hash)
    .bind(&req.bidder)
    .bind(&req.amount_wei)
    .bind(&req.amount_eth)
    .bind(&req.agent_id)
    .bind(agent_details)
    .bind(req.block_number)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}

/// The most recent activity entries, newest first, optionally filtered by
/// round.
pub async fn list_recent(
    pool: &PgPool,
    round: Option<i32>,
    limit: i64,
) -> anyhow::Result<Vec<BidActivity>> {
    let activities = match round {
        Some(round) => {
            sqlx::query_as::<_, BidActivity>(
                r#"
                SELECT * FROM pot_activity
                WHERE round = $1
                ORDER BY timestamp DESC
                LIMIT $2
                "#,
            )
            .bind(round)
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, BidActivity>(
                "SELECT * FROM pot_activity ORDER BY timestamp DESC LIMIT $1",
            )
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(activities)
}

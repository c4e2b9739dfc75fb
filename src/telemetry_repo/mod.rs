// SQLite telemetry store: device registry, reading recorder and the per-tier
// normalizers. One submission is written in one transaction.

mod dashboard;
mod high;
mod low;
mod medium;
pub mod schema;
pub(crate) mod storage_tree;

pub use dashboard::DashboardQuery;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Row, SqliteConnection};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;
use tracing::instrument;

use crate::models::{ReadingSummary, Submission, Tier, TierData};
use crate::timestamp::format_utc;

/// Ids produced by storing one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredReading {
    pub device_id: i64,
    pub reading_id: i64,
}

pub struct TelemetryRepo {
    pool: SqlitePool,
}

impl TelemetryRepo {
    /// Open (and create if missing) the database at `path` with WAL and foreign keys on.
    pub async fn connect(path: &str, max_pool_size: u32) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_pool_size)
            .connect_with(opts)
            .await?;
        Ok(Self { pool })
    }

    pub async fn init(&self) -> anyhow::Result<()> {
        schema::create_all(&self.pool).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Cheap connectivity probe for the health endpoint.
    pub async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Register/touch the device, create the reading and fan the tier payload
    /// out into its child tables, all in one transaction.
    #[instrument(
        skip(self, submission),
        fields(repo = "telemetry", operation = "record_submission", device = %submission.device_id, tier = %submission.tier())
    )]
    pub async fn record_submission(&self, submission: &Submission) -> anyhow::Result<StoredReading> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;
        let device_id = get_or_create_device(&mut tx, &submission.device_id, now).await?;
        let reading_id = create_reading(
            &mut tx,
            device_id,
            submission.timestamp,
            submission.timestamp_ms,
            submission.tier(),
            now,
        )
        .await?;
        normalize(&mut tx, reading_id, &submission.data).await?;
        tx.commit().await?;
        tracing::debug!(device_id, reading_id, "reading stored");
        Ok(StoredReading {
            device_id,
            reading_id,
        })
    }

    /// Store submissions one after another; stops at the first failure.
    pub async fn record_batch(&self, submissions: &[Submission]) -> anyhow::Result<Vec<StoredReading>> {
        let mut stored = Vec::with_capacity(submissions.len());
        for s in submissions {
            stored.push(self.record_submission(s).await?);
        }
        Ok(stored)
    }

    /// One reading with per-table child row counts for its tier.
    #[instrument(skip(self), fields(repo = "telemetry", operation = "reading_summary"))]
    pub async fn reading_summary(&self, reading_id: i64) -> anyhow::Result<Option<ReadingSummary>> {
        let row = sqlx::query(
            "SELECT r.id, d.external_id, r.recorded_at, r.timestamp_ms, r.tier
             FROM readings r JOIN devices d ON d.id = r.device_id
             WHERE r.id = $1",
        )
        .bind(reading_id)
        .fetch_optional(&self.pool)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let tier_str: String = row.try_get("tier")?;
        let tier = Tier::from_str(&tier_str)?;

        let mut child_rows = BTreeMap::new();
        for table in schema::CHILD_TABLES {
            let count: i64 = sqlx::query_scalar(&format!(
                "SELECT COUNT(*) FROM {} WHERE reading_id = $1",
                table.name
            ))
            .bind(reading_id)
            .fetch_one(&self.pool)
            .await?;
            if count > 0 || table.tier == tier {
                child_rows.insert(table.name, count);
            }
        }

        Ok(Some(ReadingSummary {
            id: row.try_get("id")?,
            device_id: row.try_get("external_id")?,
            timestamp: row.try_get("recorded_at")?,
            timestamp_ms: row.try_get("timestamp_ms")?,
            frequency: tier,
            child_rows,
        }))
    }

    /// Delete readings recorded before `cutoff`; child rows follow by cascade.
    #[instrument(skip(self), fields(repo = "telemetry", operation = "prune_readings_before"))]
    pub async fn prune_readings_before(&self, cutoff: DateTime<Utc>) -> anyhow::Result<u64> {
        let r = sqlx::query("DELETE FROM readings WHERE recorded_at < $1")
            .bind(format_utc(cutoff))
            .execute(&self.pool)
            .await?;
        Ok(r.rows_affected())
    }

    /// Reclaim space after deletes (run periodically after pruning).
    #[instrument(skip(self), fields(repo = "telemetry", operation = "vacuum"))]
    pub async fn vacuum(&self) -> anyhow::Result<()> {
        sqlx::query("VACUUM").execute(&self.pool).await?;
        Ok(())
    }
}

/// Idempotent get-or-create by external id; also bumps `last_seen`.
pub async fn get_or_create_device(
    conn: &mut SqliteConnection,
    external_id: &str,
    now: DateTime<Utc>,
) -> anyhow::Result<i64> {
    let now = format_utc(now);
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO devices (external_id, name, created_at, last_seen) VALUES ($1, $1, $2, $2)
         ON CONFLICT(external_id) DO UPDATE SET last_seen = excluded.last_seen
         RETURNING id",
    )
    .bind(external_id)
    .bind(&now)
    .fetch_one(&mut *conn)
    .await?;
    Ok(id)
}

pub async fn create_reading(
    conn: &mut SqliteConnection,
    device_id: i64,
    timestamp: DateTime<Utc>,
    timestamp_ms: i64,
    tier: Tier,
    now: DateTime<Utc>,
) -> anyhow::Result<i64> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO readings (device_id, recorded_at, timestamp_ms, tier, created_at) VALUES ($1, $2, $3, $4, $5)
         RETURNING id",
    )
    .bind(device_id)
    .bind(format_utc(timestamp))
    .bind(timestamp_ms)
    .bind(tier.as_str())
    .bind(format_utc(now))
    .fetch_one(&mut *conn)
    .await?;
    Ok(id)
}

/// Dispatch to the normalizer of the payload's tier.
pub async fn normalize(
    conn: &mut SqliteConnection,
    reading_id: i64,
    data: &TierData,
) -> anyhow::Result<()> {
    match data {
        TierData::High(d) => high::insert(conn, reading_id, d).await,
        TierData::Medium(d) => medium::insert(conn, reading_id, d).await,
        TierData::Low(d) => low::insert(conn, reading_id, d).await,
    }
}

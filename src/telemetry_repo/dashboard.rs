// Dashboard reads. The windowed series share one reading window; the "latest"
// lookups (processes/GPU, display, network) are independent queries and may
// come from different submissions if data arrives mid-request.

use chrono::{DateTime, Duration, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use std::str::FromStr;
use tracing::instrument;

use super::TelemetryRepo;
use crate::models::{
    BatteryPoint, CpuLoadPoint, DashboardData, DeviceInfo, DisplaySnapshot, GpuData,
    LatestReading, MemoryPoint, NetworkTotals, ProcessData, ThermalPoint, Tier, TimeWindow,
};
use crate::timestamp::format_utc;

#[derive(Debug, Clone)]
pub struct DashboardQuery {
    /// External device id; `None` selects the most recently seen device.
    pub device_id: Option<String>,
    pub hours: u32,
    pub limit: u32,
    pub top_processes: u32,
}

/// Bounds shared by every windowed query of one request.
struct ReadingWindow {
    device_id: i64,
    from: String,
    to: String,
    limit: i64,
}

/// Selects the newest `limit` readings of the device inside the window.
const RECENT_CTE: &str = "WITH recent AS (
    SELECT id, recorded_at FROM readings
    WHERE device_id = $1 AND recorded_at >= $2 AND recorded_at <= $3
    ORDER BY recorded_at DESC, id DESC
    LIMIT $4
)";

impl TelemetryRepo {
    /// All devices, most recently seen first.
    #[instrument(skip(self), fields(repo = "telemetry", operation = "list_devices"))]
    pub async fn list_devices(&self) -> anyhow::Result<Vec<DeviceInfo>> {
        let devices = sqlx::query_as::<_, DeviceInfo>(
            "SELECT d.id, d.external_id, d.name, d.created_at, d.last_seen,
                    (SELECT COUNT(*) FROM readings r WHERE r.device_id = d.id) AS reading_count
             FROM devices d
             ORDER BY d.last_seen DESC, d.id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(devices)
    }

    /// Build the dashboard for one device. `Ok(None)` means the requested device is unknown;
    /// with no devices at all the empty dashboard is returned.
    #[instrument(skip(self), fields(repo = "telemetry", operation = "dashboard"))]
    pub async fn dashboard(
        &self,
        query: &DashboardQuery,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Option<DashboardData>> {
        let time_range = TimeWindow {
            hours: query.hours,
            from: format_utc(now - Duration::hours(query.hours as i64)),
            to: format_utc(now),
        };

        let devices = self.list_devices().await?;
        if devices.is_empty() {
            return Ok(Some(DashboardData::empty(time_range)));
        }
        let device = match &query.device_id {
            Some(ext) => match devices.iter().find(|d| &d.external_id == ext) {
                Some(d) => d.clone(),
                None => return Ok(None),
            },
            None => devices[0].clone(),
        };

        let window = ReadingWindow {
            device_id: device.id,
            from: time_range.from.clone(),
            to: time_range.to.clone(),
            limit: query.limit as i64,
        };

        let readings = self.window_readings(&window).await?;
        let latest = match readings.first() {
            Some((id, timestamp, tier)) => Some(LatestReading {
                id: *id,
                timestamp: timestamp.clone(),
                frequency: Tier::from_str(tier)?,
            }),
            None => None,
        };

        let battery: Vec<BatteryPoint> = self
            .window_series(
                &window,
                "c.level, c.temperature, c.voltage, c.status",
                "battery_readings",
            )
            .await?;
        let thermal: Vec<ThermalPoint> = self
            .window_series(
                &window,
                "c.max_temperature, c.avg_temperature, c.throttling",
                "thermal_summaries",
            )
            .await?;
        let cpu: Vec<CpuLoadPoint> = self
            .window_series(
                &window,
                "c.usage_percent, c.load1, c.load5, c.load15",
                "cpu_load_readings",
            )
            .await?;
        let memory: Vec<MemoryPoint> = self
            .window_series(
                &window,
                "c.used_percent, c.total_kb, c.available_kb",
                "memory_readings",
            )
            .await?;

        let (top_processes, gpu) = match self.latest_reading_id(device.id, Tier::Medium).await? {
            Some(id) => (
                self.top_processes(id, query.top_processes).await?,
                self.gpu(id).await?,
            ),
            None => (vec![], None),
        };

        let display = match self.latest_reading_id(device.id, Tier::Low).await? {
            Some(id) => self.display(id).await?,
            None => None,
        };

        let network = self.latest_network_totals(device.id).await?;

        Ok(Some(DashboardData {
            devices,
            device: Some(device),
            time_range,
            reading_count: readings.len(),
            latest,
            battery,
            thermal,
            cpu,
            memory,
            top_processes,
            gpu,
            display,
            network,
        }))
    }

    /// (id, recorded_at, tier), newest first.
    async fn window_readings(&self, w: &ReadingWindow) -> anyhow::Result<Vec<(i64, String, String)>> {
        let rows = sqlx::query_as::<_, (i64, String, String)>(
            "SELECT id, recorded_at, tier FROM readings
             WHERE device_id = $1 AND recorded_at >= $2 AND recorded_at <= $3
             ORDER BY recorded_at DESC, id DESC
             LIMIT $4",
        )
        .bind(w.device_id)
        .bind(&w.from)
        .bind(&w.to)
        .bind(w.limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Child rows of `table` for the window's readings, oldest first.
    async fn window_series<T>(
        &self,
        w: &ReadingWindow,
        columns: &str,
        table: &str,
    ) -> anyhow::Result<Vec<T>>
    where
        T: for<'r> sqlx::FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let sql = format!(
            "{RECENT_CTE}
             SELECT recent.recorded_at AS timestamp, {columns}
             FROM recent JOIN {table} c ON c.reading_id = recent.id
             ORDER BY recent.recorded_at ASC, recent.id ASC"
        );
        let rows = sqlx::query_as::<_, T>(&sql)
            .bind(w.device_id)
            .bind(&w.from)
            .bind(&w.to)
            .bind(w.limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn latest_reading_id(&self, device_id: i64, tier: Tier) -> anyhow::Result<Option<i64>> {
        let id = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM readings WHERE device_id = $1 AND tier = $2
             ORDER BY recorded_at DESC, id DESC LIMIT 1",
        )
        .bind(device_id)
        .bind(tier.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(id)
    }

    /// Processes of one reading ranked by memory share.
    async fn top_processes(&self, reading_id: i64, limit: u32) -> anyhow::Result<Vec<ProcessData>> {
        let rows = sqlx::query(
            "SELECT pid, name, state, user_name, cpu_percent, memory_percent, rss_kb, threads
             FROM process_readings WHERE reading_id = $1
             ORDER BY memory_percent DESC, pid ASC
             LIMIT $2",
        )
        .bind(reading_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(ProcessData {
                pid: row.try_get("pid")?,
                name: row.try_get("name")?,
                state: row.try_get("state")?,
                user: row.try_get("user_name")?,
                cpu_percent: row.try_get("cpu_percent")?,
                memory_percent: row.try_get("memory_percent")?,
                rss_kb: row.try_get("rss_kb")?,
                threads: row.try_get("threads")?,
            });
        }
        Ok(out)
    }

    async fn gpu(&self, reading_id: i64) -> anyhow::Result<Option<GpuData>> {
        let row = sqlx::query(
            "SELECT model, cur_freq, min_freq, max_freq, busy_percent, governor
             FROM gpu_readings WHERE reading_id = $1",
        )
        .bind(reading_id)
        .fetch_optional(&self.pool)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Some(GpuData {
            model: row.try_get("model")?,
            cur_freq: row.try_get("cur_freq")?,
            min_freq: row.try_get("min_freq")?,
            max_freq: row.try_get("max_freq")?,
            busy_percent: row.try_get("busy_percent")?,
            governor: row.try_get("governor")?,
        }))
    }

    async fn display(&self, reading_id: i64) -> anyhow::Result<Option<DisplaySnapshot>> {
        let snapshot = sqlx::query_as::<_, DisplaySnapshot>(
            "SELECT r.recorded_at AS timestamp, d.brightness, d.max_brightness, d.screen_on
             FROM display_readings d JOIN readings r ON r.id = d.reading_id
             WHERE d.reading_id = $1",
        )
        .bind(reading_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(snapshot)
    }

    async fn latest_network_totals(&self, device_id: i64) -> anyhow::Result<Option<NetworkTotals>> {
        let totals = sqlx::query_as::<_, NetworkTotals>(
            "SELECT r.recorded_at AS timestamp, n.total_rx_bytes, n.total_tx_bytes,
                    n.active_interfaces, n.connection_type
             FROM network_summaries n JOIN readings r ON r.id = n.reading_id
             WHERE r.device_id = $1
             ORDER BY r.recorded_at DESC, r.id DESC
             LIMIT 1",
        )
        .bind(device_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(totals)
    }
}

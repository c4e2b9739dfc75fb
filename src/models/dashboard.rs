// Dashboard response: per-device time series and latest-value snapshots.
// Series are ascending by timestamp.

use serde::Serialize;

use super::{GpuData, ProcessData, Tier};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub id: i64,
    pub external_id: String,
    pub name: Option<String>,
    pub created_at: String,
    pub last_seen: String,
    pub reading_count: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    pub hours: u32,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BatteryPoint {
    pub timestamp: String,
    pub level: i32,
    pub temperature: f64,
    pub voltage: i32,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ThermalPoint {
    pub timestamp: String,
    pub max_temperature: f64,
    pub avg_temperature: f64,
    pub throttling: bool,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CpuLoadPoint {
    pub timestamp: String,
    pub usage_percent: f64,
    pub load1: f64,
    pub load5: f64,
    pub load15: f64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MemoryPoint {
    pub timestamp: String,
    pub used_percent: f64,
    pub total_kb: i64,
    pub available_kb: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct NetworkTotals {
    pub timestamp: String,
    pub total_rx_bytes: i64,
    pub total_tx_bytes: i64,
    pub active_interfaces: i32,
    pub connection_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DisplaySnapshot {
    pub timestamp: String,
    pub brightness: i32,
    pub max_brightness: i32,
    pub screen_on: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestReading {
    pub id: i64,
    pub timestamp: String,
    pub frequency: Tier,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub devices: Vec<DeviceInfo>,
    pub device: Option<DeviceInfo>,
    pub time_range: TimeWindow,
    pub reading_count: usize,
    pub latest: Option<LatestReading>,
    pub battery: Vec<BatteryPoint>,
    pub thermal: Vec<ThermalPoint>,
    pub cpu: Vec<CpuLoadPoint>,
    pub memory: Vec<MemoryPoint>,
    pub top_processes: Vec<ProcessData>,
    pub gpu: Option<GpuData>,
    pub display: Option<DisplaySnapshot>,
    pub network: Option<NetworkTotals>,
}

impl DashboardData {
    /// Response when no device has reported yet.
    pub fn empty(time_range: TimeWindow) -> Self {
        Self {
            devices: vec![],
            device: None,
            time_range,
            reading_count: 0,
            latest: None,
            battery: vec![],
            thermal: vec![],
            cpu: vec![],
            memory: vec![],
            top_processes: vec![],
            gpu: None,
            display: None,
            network: None,
        }
    }
}

/// One reading with the number of child rows it owns per table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingSummary {
    pub id: i64,
    pub device_id: String,
    pub timestamp: String,
    pub timestamp_ms: i64,
    pub frequency: Tier,
    pub child_rows: std::collections::BTreeMap<&'static str, i64>,
}

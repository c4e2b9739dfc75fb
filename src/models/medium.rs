// Medium-frequency tier: CPU residency stats, GPU, storage and processes

use serde::{Deserialize, Serialize};

use super::numeric::{int_or_string, opt_int_or_string};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediumTierData {
    pub cpu_stats: CpuStatsData,
    pub gpu: GpuData,
    pub storage: StorageData,
    pub processes: ProcessesData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuStatsData {
    #[serde(default)]
    pub frequency_stats: Vec<CpuFrequencyStatData>,
    #[serde(default)]
    pub idle_stats: Vec<CpuIdleStatData>,
}

/// Time a core spent at one frequency (cpufreq time_in_state).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuFrequencyStatData {
    pub core: i32,
    #[serde(deserialize_with = "int_or_string")]
    pub frequency: i64,
    #[serde(deserialize_with = "int_or_string")]
    pub time_in_state: i64,
}

/// One cpuidle state of one core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuIdleStatData {
    pub core: i32,
    pub state_name: String,
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub latency_us: Option<i64>,
    #[serde(deserialize_with = "int_or_string")]
    pub usage: i64,
    #[serde(deserialize_with = "int_or_string")]
    pub time_us: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpuData {
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub cur_freq: Option<i64>,
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub min_freq: Option<i64>,
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub max_freq: Option<i64>,
    #[serde(default)]
    pub busy_percent: Option<f64>,
    #[serde(default)]
    pub governor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageData {
    #[serde(default)]
    pub devices: Vec<StorageDeviceData>,
    pub summary: StorageSummaryData,
}

/// A block device; `partitions` nest to arbitrary depth.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageDeviceData {
    pub name: String,
    #[serde(default, rename = "type")]
    pub device_type: Option<String>,
    #[serde(deserialize_with = "int_or_string")]
    pub size_bytes: i64,
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub used_bytes: Option<i64>,
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub available_bytes: Option<i64>,
    #[serde(default)]
    pub mount_point: Option<String>,
    #[serde(default)]
    pub fs_type: Option<String>,
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub read_bytes: Option<i64>,
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub write_bytes: Option<i64>,
    #[serde(default)]
    pub partitions: Vec<StorageDeviceData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageSummaryData {
    #[serde(deserialize_with = "int_or_string")]
    pub total_bytes: i64,
    #[serde(deserialize_with = "int_or_string")]
    pub used_bytes: i64,
    #[serde(deserialize_with = "int_or_string")]
    pub available_bytes: i64,
    pub used_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessesData {
    #[serde(default)]
    pub list: Vec<ProcessData>,
    pub summary: ProcessSummaryData,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProcessData {
    pub pid: i32,
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    pub cpu_percent: f64,
    pub memory_percent: f64,
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub rss_kb: Option<i64>,
    #[serde(default)]
    pub threads: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSummaryData {
    pub total: i32,
    #[serde(default)]
    pub running: Option<i32>,
    #[serde(default)]
    pub sleeping: Option<i32>,
    #[serde(default)]
    pub zombie: Option<i32>,
    #[serde(default)]
    pub total_threads: Option<i32>,
}

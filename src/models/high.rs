// High-frequency tier: power, thermal, per-core CPU, memory and network

use serde::{Deserialize, Serialize};

use super::numeric::{int_or_string, opt_int_or_string};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighTierData {
    pub battery: BatteryData,
    pub power: PowerData,
    pub thermal: ThermalData,
    pub cpu: CpuData,
    pub memory: MemoryData,
    pub network: NetworkData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatteryData {
    /// Charge level in percent.
    pub level: i32,
    pub status: String,
    pub health: String,
    #[serde(default)]
    pub plugged: Option<String>,
    #[serde(default = "default_true")]
    pub present: bool,
    #[serde(default)]
    pub technology: Option<String>,
    /// Millivolts.
    pub voltage: i32,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Microamps, negative while discharging.
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub current_now: Option<i64>,
    /// Microamp-hours.
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub charge_counter: Option<i64>,
    #[serde(default)]
    pub cycle_count: Option<i32>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerData {
    pub usb_input: UsbInputData,
    pub usb_pd: UsbPdData,
    pub type_c_port: TypeCPortData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsbInputData {
    pub online: bool,
    #[serde(default)]
    pub usb_type: Option<String>,
    /// Microvolts.
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub voltage_now: Option<i64>,
    /// Microamps.
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub current_max: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsbPdData {
    pub active: bool,
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub voltage_max: Option<i64>,
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub current_max: Option<i64>,
    #[serde(default)]
    pub power_role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCPortData {
    pub port_name: String,
    pub connected: bool,
    #[serde(default)]
    pub power_role: Option<String>,
    #[serde(default)]
    pub data_role: Option<String>,
    #[serde(default)]
    pub power_operation_mode: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThermalData {
    #[serde(default)]
    pub zones: Vec<ThermalZoneData>,
    #[serde(default)]
    pub cooling_devices: Vec<CoolingDeviceData>,
    pub summary: ThermalSummaryData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThermalZoneData {
    pub zone_id: i32,
    #[serde(rename = "type")]
    pub zone_type: String,
    /// Degrees Celsius.
    pub temperature: f64,
    #[serde(default)]
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoolingDeviceData {
    pub device_id: i32,
    #[serde(rename = "type")]
    pub device_type: String,
    pub cur_state: i32,
    pub max_state: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThermalSummaryData {
    pub max_temperature: f64,
    pub avg_temperature: f64,
    pub zone_count: i32,
    #[serde(default)]
    pub hottest_zone: Option<String>,
    #[serde(default)]
    pub throttling: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuData {
    #[serde(default)]
    pub frequencies: Vec<CpuFrequencyData>,
    #[serde(default)]
    pub times: Vec<CpuTimeData>,
    pub load: CpuLoadData,
}

/// Per-core scaling state; frequencies in kHz.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuFrequencyData {
    pub core: i32,
    #[serde(deserialize_with = "int_or_string")]
    pub cur_freq: i64,
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub min_freq: Option<i64>,
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub max_freq: Option<i64>,
    #[serde(default)]
    pub governor: Option<String>,
    #[serde(default = "default_true")]
    pub online: bool,
}

/// Per-core /proc/stat counters in clock ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuTimeData {
    pub core: i32,
    #[serde(deserialize_with = "int_or_string")]
    pub user: i64,
    #[serde(deserialize_with = "int_or_string")]
    pub nice: i64,
    #[serde(deserialize_with = "int_or_string")]
    pub system: i64,
    #[serde(deserialize_with = "int_or_string")]
    pub idle: i64,
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub iowait: Option<i64>,
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub irq: Option<i64>,
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub softirq: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuLoadData {
    pub usage_percent: f64,
    pub load1: f64,
    pub load5: f64,
    pub load15: f64,
    #[serde(default)]
    pub running_processes: Option<i32>,
    #[serde(default)]
    pub total_processes: Option<i32>,
}

/// /proc/meminfo values in kB.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryData {
    #[serde(deserialize_with = "int_or_string")]
    pub total_kb: i64,
    #[serde(deserialize_with = "int_or_string")]
    pub free_kb: i64,
    #[serde(deserialize_with = "int_or_string")]
    pub available_kb: i64,
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub buffers_kb: Option<i64>,
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub cached_kb: Option<i64>,
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub swap_total_kb: Option<i64>,
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub swap_free_kb: Option<i64>,
    pub used_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkData {
    #[serde(default)]
    pub interfaces: Vec<NetworkInterfaceData>,
    pub summary: NetworkSummaryData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterfaceData {
    pub name: String,
    #[serde(default)]
    pub is_up: bool,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub mtu: Option<i32>,
    #[serde(deserialize_with = "int_or_string")]
    pub rx_bytes: i64,
    #[serde(deserialize_with = "int_or_string")]
    pub tx_bytes: i64,
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub rx_packets: Option<i64>,
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub tx_packets: Option<i64>,
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub rx_errors: Option<i64>,
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub tx_errors: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkSummaryData {
    #[serde(deserialize_with = "int_or_string")]
    pub total_rx_bytes: i64,
    #[serde(deserialize_with = "int_or_string")]
    pub total_tx_bytes: i64,
    pub active_interfaces: i32,
    #[serde(default)]
    pub connection_type: Option<String>,
    /// dBm.
    #[serde(default)]
    pub wifi_rssi: Option<i32>,
}

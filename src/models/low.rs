// Low-frequency tier: environment sensors, display, LEDs, radios, wakeups

use serde::{Deserialize, Serialize};

use super::numeric::{int_or_string, opt_int_or_string};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowTierData {
    pub sensors: SensorsData,
    pub display: DisplayData,
    #[serde(default)]
    pub leds: Vec<LedData>,
    #[serde(default)]
    pub rfkill: Vec<RfkillData>,
    pub wakeup: WakeupData,
}

/// Last sample of each environment sensor; absent sensors stay null.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorsData {
    #[serde(default)]
    pub accelerometer_x: Option<f64>,
    #[serde(default)]
    pub accelerometer_y: Option<f64>,
    #[serde(default)]
    pub accelerometer_z: Option<f64>,
    #[serde(default)]
    pub light_lux: Option<f64>,
    #[serde(default)]
    pub proximity_cm: Option<f64>,
    #[serde(default)]
    pub pressure_hpa: Option<f64>,
    #[serde(default)]
    pub ambient_temperature: Option<f64>,
    #[serde(default)]
    pub humidity_percent: Option<f64>,
    #[serde(default, deserialize_with = "opt_int_or_string")]
    pub step_count: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayData {
    pub brightness: i32,
    pub max_brightness: i32,
    #[serde(default)]
    pub screen_on: bool,
    #[serde(default)]
    pub refresh_rate: Option<f64>,
    #[serde(default)]
    pub width: Option<i32>,
    #[serde(default)]
    pub height: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedData {
    pub name: String,
    pub brightness: i32,
    #[serde(default)]
    pub max_brightness: Option<i32>,
    #[serde(default)]
    pub trigger: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RfkillData {
    pub index: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub rfkill_type: String,
    pub soft_blocked: bool,
    pub hard_blocked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WakeupData {
    #[serde(deserialize_with = "int_or_string")]
    pub count: i64,
    #[serde(default)]
    pub active_sources: Option<i32>,
}

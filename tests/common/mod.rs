// Shared test helpers: tier payload builders and a throwaway repository
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use tempfile::TempDir;
use telemetry_server::ingest::validate_submission;
use telemetry_server::models::{RawSubmission, Submission};
use telemetry_server::telemetry_repo::TelemetryRepo;
use telemetry_server::timestamp::format_utc;

pub const HIGH_ONLY_TABLES: &[&str] = &[
    "battery_readings",
    "usb_input_readings",
    "usb_pd_readings",
    "type_c_port_readings",
    "thermal_zone_readings",
    "cooling_device_readings",
    "thermal_summaries",
    "cpu_frequency_readings",
    "cpu_time_readings",
    "cpu_load_readings",
    "memory_readings",
    "network_interface_readings",
    "network_summaries",
];

pub const MEDIUM_ONLY_TABLES: &[&str] = &[
    "cpu_frequency_stats",
    "cpu_idle_stats",
    "gpu_readings",
    "storage_devices",
    "storage_summaries",
    "process_readings",
    "process_summaries",
];

pub const LOW_ONLY_TABLES: &[&str] = &[
    "sensor_readings",
    "display_readings",
    "led_readings",
    "rfkill_readings",
    "wakeup_counts",
];

/// Repository on a fresh SQLite file. Keep the TempDir alive for the test's duration.
pub async fn test_repo() -> (TempDir, TelemetryRepo) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("telemetry.db");
    let repo = TelemetryRepo::connect(path.to_str().unwrap(), 4)
        .await
        .unwrap();
    repo.init().await.unwrap();
    (dir, repo)
}

pub fn high_data() -> Value {
    high_data_with(55, 30.5, 62.5)
}

/// High-tier data with the values the dashboard series pick up.
pub fn high_data_with(battery_level: i32, cpu_usage: f64, mem_used_percent: f64) -> Value {
    json!({
        "battery": {
            "level": battery_level,
            "status": "discharging",
            "health": "good",
            "plugged": null,
            "technology": "Li-ion",
            "voltage": 3870,
            "temperature": 31.2,
            "currentNow": "-412000",
            "chargeCounter": 2_450_000
        },
        "power": {
            "usbInput": {"online": false},
            "usbPd": {"active": false},
            "typeCPort": {"portName": "port0", "connected": false}
        },
        "thermal": {
            "zones": [
                {"zoneId": 0, "type": "cpu-0-0", "temperature": 41.5},
                {"zoneId": 1, "type": "battery", "temperature": 31.2, "mode": "enabled"}
            ],
            "coolingDevices": [
                {"deviceId": 0, "type": "thermal-cpufreq-0", "curState": 0, "maxState": 12}
            ],
            "summary": {"maxTemperature": 41.5, "avgTemperature": 36.35, "zoneCount": 2, "hottestZone": "cpu-0-0"}
        },
        "cpu": {
            "frequencies": [
                {"core": 0, "curFreq": 1_804_800, "minFreq": 300_000, "maxFreq": 1_804_800, "governor": "schedutil"},
                {"core": 1, "curFreq": "1804800"},
                {"core": 2, "curFreq": 2_419_200},
                {"core": 3, "curFreq": 2_419_200, "online": false}
            ],
            "times": [
                {"core": 0, "user": "123456789012", "nice": 10, "system": 5000, "idle": 900_000},
                {"core": 1, "user": 1000, "nice": 0, "system": 400, "idle": "880000", "iowait": 12},
                {"core": 2, "user": 1000, "nice": 0, "system": 400, "idle": 880_000},
                {"core": 3, "user": 1000, "nice": 0, "system": 400, "idle": 880_000}
            ],
            "load": {"usagePercent": cpu_usage, "load1": 2.1, "load5": 1.8, "load15": 1.5, "totalProcesses": 412}
        },
        "memory": {
            "totalKb": "7812345",
            "freeKb": 512_000,
            "availableKb": 2_900_000,
            "cachedKb": 1_800_000,
            "usedPercent": mem_used_percent
        },
        "network": {
            "interfaces": [
                {"name": "wlan0", "isUp": true, "rxBytes": "98765432101", "txBytes": 12_345_678},
                {"name": "rmnet0", "isUp": false, "rxBytes": 0, "txBytes": 0}
            ],
            "summary": {"totalRxBytes": "98765432101", "totalTxBytes": 12_345_678, "activeInterfaces": 1, "connectionType": "wifi", "wifiRssi": -58}
        }
    })
}

pub fn medium_data() -> Value {
    let processes: Vec<Value> = (0..20i32)
        .map(|i| {
            json!({
                "pid": 1000 + i,
                "name": format!("proc-{}", i),
                "state": "S",
                "cpuPercent": 0.5,
                "memoryPercent": f64::from(i) * 0.5,
                "rssKb": 10_000 + i * 100
            })
        })
        .collect();
    json!({
        "cpuStats": {
            "frequencyStats": [
                {"core": 0, "frequency": 300_000, "timeInState": "884213"},
                {"core": 0, "frequency": 1_804_800, "timeInState": 99_120}
            ],
            "idleStats": [
                {"core": 0, "stateName": "WFI", "latencyUs": 1, "usage": 120_000, "timeUs": "8800000000"}
            ]
        },
        "gpu": {"model": "Adreno 740", "curFreq": 220_000_000, "maxFreq": "680000000", "busyPercent": 12.5, "governor": "msm-adreno-tz"},
        "storage": {
            "devices": [
                {
                    "name": "sda",
                    "type": "disk",
                    "sizeBytes": "256060514304",
                    "partitions": [
                        {"name": "sda1", "type": "part", "sizeBytes": 1_073_741_824, "mountPoint": "/vendor", "fsType": "ext4"},
                        {"name": "sda2", "type": "part", "sizeBytes": "254986772480", "mountPoint": "/data", "fsType": "f2fs", "usedBytes": 98_000_000_000_i64}
                    ]
                }
            ],
            "summary": {"totalBytes": "256060514304", "usedBytes": 98_000_000_000_i64, "availableBytes": 156_986_772_480_i64, "usedPercent": 38.4}
        },
        "processes": {
            "list": processes,
            "summary": {"total": 20, "running": 2, "sleeping": 18, "zombie": 0}
        }
    })
}

pub fn low_data() -> Value {
    low_data_with(128)
}

pub fn low_data_with(brightness: i32) -> Value {
    json!({
        "sensors": {"accelerometerX": 0.01, "accelerometerY": 9.79, "accelerometerZ": 0.2, "lightLux": 210.0, "stepCount": "5231"},
        "display": {"brightness": brightness, "maxBrightness": 255, "screenOn": true, "refreshRate": 120.0, "width": 1080, "height": 2400},
        "leds": [
            {"name": "white", "brightness": 0, "maxBrightness": 255},
            {"name": "charging", "brightness": 255, "trigger": "battery-charging"}
        ],
        "rfkill": [
            {"index": 0, "name": "phy0", "type": "wlan", "softBlocked": false, "hardBlocked": false},
            {"index": 1, "name": "hci0", "type": "bluetooth", "softBlocked": true, "hardBlocked": false}
        ],
        "wakeup": {"count": "1042", "activeSources": 3}
    })
}

pub fn data_for(tier: &str) -> Value {
    match tier {
        "high" => high_data(),
        "medium" => medium_data(),
        "low" => low_data(),
        other => panic!("no fixture for tier {}", other),
    }
}

/// Wire payload as a device would post it.
pub fn payload(device_id: &str, timestamp: DateTime<Utc>, tier: &str, data: Value) -> Value {
    json!({
        "deviceId": device_id,
        "timestamp": format_utc(timestamp),
        "timestampMs": timestamp.timestamp_millis(),
        "frequency": tier,
        "data": data,
    })
}

/// Validated submission built from [`payload`].
pub fn submission(device_id: &str, timestamp: DateTime<Utc>, tier: &str, data: Value) -> Submission {
    let raw: RawSubmission =
        serde_json::from_value(payload(device_id, timestamp, tier, data)).unwrap();
    validate_submission(raw).unwrap()
}

pub async fn count(repo: &TelemetryRepo, sql: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(sql)
        .fetch_one(repo.pool())
        .await
        .unwrap()
}

pub async fn rows_for_reading(repo: &TelemetryRepo, table: &str, reading_id: i64) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!(
        "SELECT COUNT(*) FROM {} WHERE reading_id = $1",
        table
    ))
    .bind(reading_id)
    .fetch_one(repo.pool())
    .await
    .unwrap()
}

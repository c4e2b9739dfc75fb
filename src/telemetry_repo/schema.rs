// Table definitions. One parent `readings` table, one child table per subsystem.
// Children reference readings(id) with ON DELETE CASCADE; exactly-one children
// carry UNIQUE(reading_id).

use sqlx::SqlitePool;

use crate::models::Tier;

/// A per-subsystem child table of `readings`.
#[derive(Debug, Clone, Copy)]
pub struct ChildTable {
    pub name: &'static str,
    pub tier: Tier,
    /// At most one row per reading.
    pub unique: bool,
    columns: &'static str,
}

const DEVICES: &str = r#"
CREATE TABLE IF NOT EXISTS devices (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    external_id TEXT NOT NULL UNIQUE,
    name TEXT,
    created_at TEXT NOT NULL,
    last_seen TEXT NOT NULL
)
"#;

const READINGS: &str = r#"
CREATE TABLE IF NOT EXISTS readings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    device_id INTEGER NOT NULL REFERENCES devices(id) ON DELETE CASCADE,
    recorded_at TEXT NOT NULL,
    timestamp_ms INTEGER NOT NULL,
    tier TEXT NOT NULL CHECK (tier IN ('high', 'medium', 'low')),
    created_at TEXT NOT NULL
)
"#;

const READING_INDEXES: [&str; 2] = [
    "CREATE INDEX IF NOT EXISTS idx_readings_device_recorded ON readings(device_id, recorded_at)",
    "CREATE INDEX IF NOT EXISTS idx_readings_device_tier_recorded ON readings(device_id, tier, recorded_at)",
];

pub const CHILD_TABLES: &[ChildTable] = &[
    // high
    ChildTable {
        name: "battery_readings",
        tier: Tier::High,
        unique: true,
        columns: "level INTEGER NOT NULL, status TEXT NOT NULL, health TEXT NOT NULL, plugged TEXT, \
                  present INTEGER NOT NULL, technology TEXT, voltage INTEGER NOT NULL, \
                  temperature REAL NOT NULL, current_now INTEGER, charge_counter INTEGER, cycle_count INTEGER",
    },
    ChildTable {
        name: "usb_input_readings",
        tier: Tier::High,
        unique: true,
        columns: "online INTEGER NOT NULL, usb_type TEXT, voltage_now INTEGER, current_max INTEGER",
    },
    ChildTable {
        name: "usb_pd_readings",
        tier: Tier::High,
        unique: true,
        columns: "active INTEGER NOT NULL, voltage_max INTEGER, current_max INTEGER, power_role TEXT",
    },
    ChildTable {
        name: "type_c_port_readings",
        tier: Tier::High,
        unique: true,
        columns: "port_name TEXT NOT NULL, connected INTEGER NOT NULL, power_role TEXT, data_role TEXT, \
                  power_operation_mode TEXT",
    },
    ChildTable {
        name: "thermal_zone_readings",
        tier: Tier::High,
        unique: false,
        columns: "zone_id INTEGER NOT NULL, zone_type TEXT NOT NULL, temperature REAL NOT NULL, mode TEXT",
    },
    ChildTable {
        name: "cooling_device_readings",
        tier: Tier::High,
        unique: false,
        columns: "device_id INTEGER NOT NULL, device_type TEXT NOT NULL, cur_state INTEGER NOT NULL, \
                  max_state INTEGER NOT NULL",
    },
    ChildTable {
        name: "thermal_summaries",
        tier: Tier::High,
        unique: true,
        columns: "max_temperature REAL NOT NULL, avg_temperature REAL NOT NULL, zone_count INTEGER NOT NULL, \
                  hottest_zone TEXT, throttling INTEGER NOT NULL",
    },
    ChildTable {
        name: "cpu_frequency_readings",
        tier: Tier::High,
        unique: false,
        columns: "core INTEGER NOT NULL, cur_freq INTEGER NOT NULL, min_freq INTEGER, max_freq INTEGER, \
                  governor TEXT, online INTEGER NOT NULL",
    },
    ChildTable {
        name: "cpu_time_readings",
        tier: Tier::High,
        unique: false,
        columns: "core INTEGER NOT NULL, user_ticks INTEGER NOT NULL, nice_ticks INTEGER NOT NULL, \
                  system_ticks INTEGER NOT NULL, idle_ticks INTEGER NOT NULL, iowait_ticks INTEGER, \
                  irq_ticks INTEGER, softirq_ticks INTEGER",
    },
    ChildTable {
        name: "cpu_load_readings",
        tier: Tier::High,
        unique: true,
        columns: "usage_percent REAL NOT NULL, load1 REAL NOT NULL, load5 REAL NOT NULL, load15 REAL NOT NULL, \
                  running_processes INTEGER, total_processes INTEGER",
    },
    ChildTable {
        name: "memory_readings",
        tier: Tier::High,
        unique: true,
        columns: "total_kb INTEGER NOT NULL, free_kb INTEGER NOT NULL, available_kb INTEGER NOT NULL, \
                  buffers_kb INTEGER, cached_kb INTEGER, swap_total_kb INTEGER, swap_free_kb INTEGER, \
                  used_percent REAL NOT NULL",
    },
    ChildTable {
        name: "network_interface_readings",
        tier: Tier::High,
        unique: false,
        columns: "name TEXT NOT NULL, is_up INTEGER NOT NULL, mac_address TEXT, mtu INTEGER, \
                  rx_bytes INTEGER NOT NULL, tx_bytes INTEGER NOT NULL, rx_packets INTEGER, tx_packets INTEGER, \
                  rx_errors INTEGER, tx_errors INTEGER",
    },
    ChildTable {
        name: "network_summaries",
        tier: Tier::High,
        unique: true,
        columns: "total_rx_bytes INTEGER NOT NULL, total_tx_bytes INTEGER NOT NULL, \
                  active_interfaces INTEGER NOT NULL, connection_type TEXT, wifi_rssi INTEGER",
    },
    // medium
    ChildTable {
        name: "cpu_frequency_stats",
        tier: Tier::Medium,
        unique: false,
        columns: "core INTEGER NOT NULL, frequency INTEGER NOT NULL, time_in_state INTEGER NOT NULL",
    },
    ChildTable {
        name: "cpu_idle_stats",
        tier: Tier::Medium,
        unique: false,
        columns: "core INTEGER NOT NULL, state_name TEXT NOT NULL, latency_us INTEGER, usage INTEGER NOT NULL, \
                  time_us INTEGER NOT NULL",
    },
    ChildTable {
        name: "gpu_readings",
        tier: Tier::Medium,
        unique: true,
        columns: "model TEXT, cur_freq INTEGER, min_freq INTEGER, max_freq INTEGER, busy_percent REAL, governor TEXT",
    },
    ChildTable {
        name: "storage_devices",
        tier: Tier::Medium,
        unique: false,
        columns: "parent_device_id INTEGER REFERENCES storage_devices(id) ON DELETE CASCADE, \
                  depth INTEGER NOT NULL, path TEXT NOT NULL, name TEXT NOT NULL, device_type TEXT, \
                  size_bytes INTEGER NOT NULL, used_bytes INTEGER, available_bytes INTEGER, mount_point TEXT, \
                  fs_type TEXT, read_bytes INTEGER, write_bytes INTEGER",
    },
    ChildTable {
        name: "storage_summaries",
        tier: Tier::Medium,
        unique: true,
        columns: "total_bytes INTEGER NOT NULL, used_bytes INTEGER NOT NULL, available_bytes INTEGER NOT NULL, \
                  used_percent REAL NOT NULL",
    },
    ChildTable {
        name: "process_readings",
        tier: Tier::Medium,
        unique: false,
        columns: "pid INTEGER NOT NULL, name TEXT NOT NULL, state TEXT, user_name TEXT, cpu_percent REAL NOT NULL, \
                  memory_percent REAL NOT NULL, rss_kb INTEGER, threads INTEGER",
    },
    ChildTable {
        name: "process_summaries",
        tier: Tier::Medium,
        unique: true,
        columns: "total INTEGER NOT NULL, running INTEGER, sleeping INTEGER, zombie INTEGER, total_threads INTEGER",
    },
    // low
    ChildTable {
        name: "sensor_readings",
        tier: Tier::Low,
        unique: true,
        columns: "accelerometer_x REAL, accelerometer_y REAL, accelerometer_z REAL, light_lux REAL, \
                  proximity_cm REAL, pressure_hpa REAL, ambient_temperature REAL, humidity_percent REAL, \
                  step_count INTEGER",
    },
    ChildTable {
        name: "display_readings",
        tier: Tier::Low,
        unique: true,
        columns: "brightness INTEGER NOT NULL, max_brightness INTEGER NOT NULL, screen_on INTEGER NOT NULL, \
                  refresh_rate REAL, width INTEGER, height INTEGER",
    },
    ChildTable {
        name: "led_readings",
        tier: Tier::Low,
        unique: false,
        columns: "name TEXT NOT NULL, brightness INTEGER NOT NULL, max_brightness INTEGER, trigger_name TEXT",
    },
    ChildTable {
        name: "rfkill_readings",
        tier: Tier::Low,
        unique: false,
        columns: "rfkill_index INTEGER NOT NULL, name TEXT NOT NULL, rfkill_type TEXT NOT NULL, \
                  soft_blocked INTEGER NOT NULL, hard_blocked INTEGER NOT NULL",
    },
    ChildTable {
        name: "wakeup_counts",
        tier: Tier::Low,
        unique: true,
        columns: "count INTEGER NOT NULL, active_sources INTEGER",
    },
];

impl ChildTable {
    fn create_sql(&self) -> String {
        let reading_ref = if self.unique {
            "reading_id INTEGER NOT NULL UNIQUE REFERENCES readings(id) ON DELETE CASCADE"
        } else {
            "reading_id INTEGER NOT NULL REFERENCES readings(id) ON DELETE CASCADE"
        };
        format!(
            "CREATE TABLE IF NOT EXISTS {} (id INTEGER PRIMARY KEY AUTOINCREMENT, {}, {})",
            self.name, reading_ref, self.columns
        )
    }

    fn index_sql(&self) -> String {
        format!(
            "CREATE INDEX IF NOT EXISTS idx_{}_reading_id ON {}(reading_id)",
            self.name, self.name
        )
    }
}

/// Create all tables and indexes if missing.
pub async fn create_all(pool: &SqlitePool) -> anyhow::Result<()> {
    let mut tx = pool.begin().await?;
    sqlx::query(DEVICES).execute(&mut *tx).await?;
    sqlx::query(READINGS).execute(&mut *tx).await?;
    for stmt in READING_INDEXES {
        sqlx::query(stmt).execute(&mut *tx).await?;
    }
    for table in CHILD_TABLES {
        sqlx::query(&table.create_sql()).execute(&mut *tx).await?;
        // UNIQUE(reading_id) already has an index
        if !table.unique {
            sqlx::query(&table.index_sql()).execute(&mut *tx).await?;
        }
    }
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_storage_devices_parent ON storage_devices(parent_device_id)",
    )
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(())
}

// High-tier normalizer: power, thermal, per-core CPU, memory, network.

use sqlx::SqliteConnection;

use crate::models::HighTierData;

pub(super) async fn insert(
    conn: &mut SqliteConnection,
    reading_id: i64,
    data: &HighTierData,
) -> anyhow::Result<()> {
    let b = &data.battery;
    sqlx::query(
        "INSERT INTO battery_readings (reading_id, level, status, health, plugged, present, technology, voltage, temperature, current_now, charge_counter, cycle_count)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
    )
    .bind(reading_id)
    .bind(b.level)
    .bind(&b.status)
    .bind(&b.health)
    .bind(&b.plugged)
    .bind(b.present)
    .bind(&b.technology)
    .bind(b.voltage)
    .bind(b.temperature)
    .bind(b.current_now)
    .bind(b.charge_counter)
    .bind(b.cycle_count)
    .execute(&mut *conn)
    .await?;

    let usb = &data.power.usb_input;
    sqlx::query(
        "INSERT INTO usb_input_readings (reading_id, online, usb_type, voltage_now, current_max) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(reading_id)
    .bind(usb.online)
    .bind(&usb.usb_type)
    .bind(usb.voltage_now)
    .bind(usb.current_max)
    .execute(&mut *conn)
    .await?;

    let pd = &data.power.usb_pd;
    sqlx::query(
        "INSERT INTO usb_pd_readings (reading_id, active, voltage_max, current_max, power_role) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(reading_id)
    .bind(pd.active)
    .bind(pd.voltage_max)
    .bind(pd.current_max)
    .bind(&pd.power_role)
    .execute(&mut *conn)
    .await?;

    let port = &data.power.type_c_port;
    sqlx::query(
        "INSERT INTO type_c_port_readings (reading_id, port_name, connected, power_role, data_role, power_operation_mode) VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(reading_id)
    .bind(&port.port_name)
    .bind(port.connected)
    .bind(&port.power_role)
    .bind(&port.data_role)
    .bind(&port.power_operation_mode)
    .execute(&mut *conn)
    .await?;

    for zone in &data.thermal.zones {
        sqlx::query(
            "INSERT INTO thermal_zone_readings (reading_id, zone_id, zone_type, temperature, mode) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(reading_id)
        .bind(zone.zone_id)
        .bind(&zone.zone_type)
        .bind(zone.temperature)
        .bind(&zone.mode)
        .execute(&mut *conn)
        .await?;
    }

    for dev in &data.thermal.cooling_devices {
        sqlx::query(
            "INSERT INTO cooling_device_readings (reading_id, device_id, device_type, cur_state, max_state) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(reading_id)
        .bind(dev.device_id)
        .bind(&dev.device_type)
        .bind(dev.cur_state)
        .bind(dev.max_state)
        .execute(&mut *conn)
        .await?;
    }

    let t = &data.thermal.summary;
    sqlx::query(
        "INSERT INTO thermal_summaries (reading_id, max_temperature, avg_temperature, zone_count, hottest_zone, throttling) VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(reading_id)
    .bind(t.max_temperature)
    .bind(t.avg_temperature)
    .bind(t.zone_count)
    .bind(&t.hottest_zone)
    .bind(t.throttling)
    .execute(&mut *conn)
    .await?;

    for f in &data.cpu.frequencies {
        sqlx::query(
            "INSERT INTO cpu_frequency_readings (reading_id, core, cur_freq, min_freq, max_freq, governor, online) VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(reading_id)
        .bind(f.core)
        .bind(f.cur_freq)
        .bind(f.min_freq)
        .bind(f.max_freq)
        .bind(&f.governor)
        .bind(f.online)
        .execute(&mut *conn)
        .await?;
    }

    for c in &data.cpu.times {
        sqlx::query(
            "INSERT INTO cpu_time_readings (reading_id, core, user_ticks, nice_ticks, system_ticks, idle_ticks, iowait_ticks, irq_ticks, softirq_ticks)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(reading_id)
        .bind(c.core)
        .bind(c.user)
        .bind(c.nice)
        .bind(c.system)
        .bind(c.idle)
        .bind(c.iowait)
        .bind(c.irq)
        .bind(c.softirq)
        .execute(&mut *conn)
        .await?;
    }

    let load = &data.cpu.load;
    sqlx::query(
        "INSERT INTO cpu_load_readings (reading_id, usage_percent, load1, load5, load15, running_processes, total_processes) VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(reading_id)
    .bind(load.usage_percent)
    .bind(load.load1)
    .bind(load.load5)
    .bind(load.load15)
    .bind(load.running_processes)
    .bind(load.total_processes)
    .execute(&mut *conn)
    .await?;

    let m = &data.memory;
    sqlx::query(
        "INSERT INTO memory_readings (reading_id, total_kb, free_kb, available_kb, buffers_kb, cached_kb, swap_total_kb, swap_free_kb, used_percent)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(reading_id)
    .bind(m.total_kb)
    .bind(m.free_kb)
    .bind(m.available_kb)
    .bind(m.buffers_kb)
    .bind(m.cached_kb)
    .bind(m.swap_total_kb)
    .bind(m.swap_free_kb)
    .bind(m.used_percent)
    .execute(&mut *conn)
    .await?;

    for iface in &data.network.interfaces {
        sqlx::query(
            "INSERT INTO network_interface_readings (reading_id, name, is_up, mac_address, mtu, rx_bytes, tx_bytes, rx_packets, tx_packets, rx_errors, tx_errors)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(reading_id)
        .bind(&iface.name)
        .bind(iface.is_up)
        .bind(&iface.mac_address)
        .bind(iface.mtu)
        .bind(iface.rx_bytes)
        .bind(iface.tx_bytes)
        .bind(iface.rx_packets)
        .bind(iface.tx_packets)
        .bind(iface.rx_errors)
        .bind(iface.tx_errors)
        .execute(&mut *conn)
        .await?;
    }

    let n = &data.network.summary;
    sqlx::query(
        "INSERT INTO network_summaries (reading_id, total_rx_bytes, total_tx_bytes, active_interfaces, connection_type, wifi_rssi) VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(reading_id)
    .bind(n.total_rx_bytes)
    .bind(n.total_tx_bytes)
    .bind(n.active_interfaces)
    .bind(&n.connection_type)
    .bind(n.wifi_rssi)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

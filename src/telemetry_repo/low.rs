// Low-tier normalizer: sensors, display, LEDs, rfkill, wakeups.

use sqlx::SqliteConnection;

use crate::models::LowTierData;

pub(super) async fn insert(
    conn: &mut SqliteConnection,
    reading_id: i64,
    data: &LowTierData,
) -> anyhow::Result<()> {
    let s = &data.sensors;
    sqlx::query(
        "INSERT INTO sensor_readings (reading_id, accelerometer_x, accelerometer_y, accelerometer_z, light_lux, proximity_cm, pressure_hpa, ambient_temperature, humidity_percent, step_count)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
    )
    .bind(reading_id)
    .bind(s.accelerometer_x)
    .bind(s.accelerometer_y)
    .bind(s.accelerometer_z)
    .bind(s.light_lux)
    .bind(s.proximity_cm)
    .bind(s.pressure_hpa)
    .bind(s.ambient_temperature)
    .bind(s.humidity_percent)
    .bind(s.step_count)
    .execute(&mut *conn)
    .await?;

    let d = &data.display;
    sqlx::query(
        "INSERT INTO display_readings (reading_id, brightness, max_brightness, screen_on, refresh_rate, width, height) VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(reading_id)
    .bind(d.brightness)
    .bind(d.max_brightness)
    .bind(d.screen_on)
    .bind(d.refresh_rate)
    .bind(d.width)
    .bind(d.height)
    .execute(&mut *conn)
    .await?;

    for led in &data.leds {
        sqlx::query(
            "INSERT INTO led_readings (reading_id, name, brightness, max_brightness, trigger_name) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(reading_id)
        .bind(&led.name)
        .bind(led.brightness)
        .bind(led.max_brightness)
        .bind(&led.trigger)
        .execute(&mut *conn)
        .await?;
    }

    for r in &data.rfkill {
        sqlx::query(
            "INSERT INTO rfkill_readings (reading_id, rfkill_index, name, rfkill_type, soft_blocked, hard_blocked) VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(reading_id)
        .bind(r.index)
        .bind(&r.name)
        .bind(&r.rfkill_type)
        .bind(r.soft_blocked)
        .bind(r.hard_blocked)
        .execute(&mut *conn)
        .await?;
    }

    sqlx::query("INSERT INTO wakeup_counts (reading_id, count, active_sources) VALUES ($1, $2, $3)")
        .bind(reading_id)
        .bind(data.wakeup.count)
        .bind(data.wakeup.active_sources)
        .execute(&mut *conn)
        .await?;

    Ok(())
}

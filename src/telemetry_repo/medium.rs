// Medium-tier normalizer: CPU residency, GPU, storage tree, processes.

use sqlx::SqliteConnection;

use super::storage_tree;
use crate::models::MediumTierData;

pub(super) async fn insert(
    conn: &mut SqliteConnection,
    reading_id: i64,
    data: &MediumTierData,
) -> anyhow::Result<()> {
    for s in &data.cpu_stats.frequency_stats {
        sqlx::query(
            "INSERT INTO cpu_frequency_stats (reading_id, core, frequency, time_in_state) VALUES ($1, $2, $3, $4)",
        )
        .bind(reading_id)
        .bind(s.core)
        .bind(s.frequency)
        .bind(s.time_in_state)
        .execute(&mut *conn)
        .await?;
    }

    for s in &data.cpu_stats.idle_stats {
        sqlx::query(
            "INSERT INTO cpu_idle_stats (reading_id, core, state_name, latency_us, usage, time_us) VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(reading_id)
        .bind(s.core)
        .bind(&s.state_name)
        .bind(s.latency_us)
        .bind(s.usage)
        .bind(s.time_us)
        .execute(&mut *conn)
        .await?;
    }

    let g = &data.gpu;
    sqlx::query(
        "INSERT INTO gpu_readings (reading_id, model, cur_freq, min_freq, max_freq, busy_percent, governor) VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(reading_id)
    .bind(&g.model)
    .bind(g.cur_freq)
    .bind(g.min_freq)
    .bind(g.max_freq)
    .bind(g.busy_percent)
    .bind(&g.governor)
    .execute(&mut *conn)
    .await?;

    storage_tree::insert(conn, reading_id, &data.storage.devices).await?;

    let s = &data.storage.summary;
    sqlx::query(
        "INSERT INTO storage_summaries (reading_id, total_bytes, used_bytes, available_bytes, used_percent) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(reading_id)
    .bind(s.total_bytes)
    .bind(s.used_bytes)
    .bind(s.available_bytes)
    .bind(s.used_percent)
    .execute(&mut *conn)
    .await?;

    for p in &data.processes.list {
        sqlx::query(
            "INSERT INTO process_readings (reading_id, pid, name, state, user_name, cpu_percent, memory_percent, rss_kb, threads)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(reading_id)
        .bind(p.pid)
        .bind(&p.name)
        .bind(&p.state)
        .bind(&p.user)
        .bind(p.cpu_percent)
        .bind(p.memory_percent)
        .bind(p.rss_kb)
        .bind(p.threads)
        .execute(&mut *conn)
        .await?;
    }

    let ps = &data.processes.summary;
    sqlx::query(
        "INSERT INTO process_summaries (reading_id, total, running, sleeping, zombie, total_threads) VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(reading_id)
    .bind(ps.total)
    .bind(ps.running)
    .bind(ps.sleeping)
    .bind(ps.zombie)
    .bind(ps.total_threads)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

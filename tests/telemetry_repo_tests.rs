// TelemetryRepo tests: registry upsert, reading fan-out per tier, storage tree, atomicity

mod common;

use chrono::{Duration, Utc};
use common::*;
use telemetry_server::models::Tier;
use telemetry_server::telemetry_repo::{self, TelemetryRepo};
use tempfile::TempDir;

#[tokio::test]
async fn telemetry_repo_connect_and_init() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("telemetry.db");
    let path_str = path.to_str().unwrap();

    let repo = TelemetryRepo::connect(path_str, 2).await.unwrap();
    repo.init().await.unwrap();
    // Second init is no-op (IF NOT EXISTS)
    repo.init().await.unwrap();
    repo.ping().await.unwrap();
    assert!(path.exists());
}

#[tokio::test]
async fn high_tier_populates_only_high_tables() {
    let (_dir, repo) = test_repo().await;
    let before = Utc::now();
    let stored = repo
        .record_submission(&submission("pixel-7", Utc::now(), "high", high_data()))
        .await
        .unwrap();

    let tier: String = sqlx::query_scalar("SELECT tier FROM readings WHERE id = $1")
        .bind(stored.reading_id)
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(tier, "high");
    assert_eq!(count(&repo, "SELECT COUNT(*) FROM readings").await, 1);

    let expected = [
        ("battery_readings", 1),
        ("usb_input_readings", 1),
        ("usb_pd_readings", 1),
        ("type_c_port_readings", 1),
        ("thermal_zone_readings", 2),
        ("cooling_device_readings", 1),
        ("thermal_summaries", 1),
        ("cpu_frequency_readings", 4),
        ("cpu_time_readings", 4),
        ("cpu_load_readings", 1),
        ("memory_readings", 1),
        ("network_interface_readings", 2),
        ("network_summaries", 1),
    ];
    for (table, n) in expected {
        assert_eq!(
            rows_for_reading(&repo, table, stored.reading_id).await,
            n,
            "{}",
            table
        );
    }
    for table in MEDIUM_ONLY_TABLES.iter().chain(LOW_ONLY_TABLES) {
        assert_eq!(
            rows_for_reading(&repo, table, stored.reading_id).await,
            0,
            "{}",
            table
        );
    }

    let last_seen: String = sqlx::query_scalar("SELECT last_seen FROM devices WHERE id = $1")
        .bind(stored.device_id)
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert!(last_seen >= telemetry_server::timestamp::format_utc(before));
}

#[tokio::test]
async fn numeric_strings_are_stored_as_integers() {
    let (_dir, repo) = test_repo().await;
    let stored = repo
        .record_submission(&submission("pixel-7", Utc::now(), "high", high_data()))
        .await
        .unwrap();

    let user_ticks: i64 = sqlx::query_scalar(
        "SELECT user_ticks FROM cpu_time_readings WHERE reading_id = $1 AND core = 0",
    )
    .bind(stored.reading_id)
    .fetch_one(repo.pool())
    .await
    .unwrap();
    assert_eq!(user_ticks, 123_456_789_012);

    let (total_kb, buffers_kb): (i64, Option<i64>) =
        sqlx::query_as("SELECT total_kb, buffers_kb FROM memory_readings WHERE reading_id = $1")
            .bind(stored.reading_id)
            .fetch_one(repo.pool())
            .await
            .unwrap();
    assert_eq!(total_kb, 7_812_345);
    assert_eq!(buffers_kb, None);

    let current_now: Option<i64> =
        sqlx::query_scalar("SELECT current_now FROM battery_readings WHERE reading_id = $1")
            .bind(stored.reading_id)
            .fetch_one(repo.pool())
            .await
            .unwrap();
    assert_eq!(current_now, Some(-412_000));
}

#[tokio::test]
async fn medium_and_low_tiers_stay_in_their_tables() {
    let (_dir, repo) = test_repo().await;
    let medium = repo
        .record_submission(&submission("pixel-7", Utc::now(), "medium", medium_data()))
        .await
        .unwrap();
    let low = repo
        .record_submission(&submission("pixel-7", Utc::now(), "low", low_data()))
        .await
        .unwrap();
    assert_eq!(medium.device_id, low.device_id);

    assert_eq!(rows_for_reading(&repo, "process_readings", medium.reading_id).await, 20);
    assert_eq!(rows_for_reading(&repo, "gpu_readings", medium.reading_id).await, 1);
    assert_eq!(rows_for_reading(&repo, "cpu_frequency_stats", medium.reading_id).await, 2);
    assert_eq!(rows_for_reading(&repo, "led_readings", low.reading_id).await, 2);
    assert_eq!(rows_for_reading(&repo, "rfkill_readings", low.reading_id).await, 2);
    assert_eq!(rows_for_reading(&repo, "wakeup_counts", low.reading_id).await, 1);

    for table in HIGH_ONLY_TABLES.iter().chain(LOW_ONLY_TABLES) {
        assert_eq!(rows_for_reading(&repo, table, medium.reading_id).await, 0, "{}", table);
    }
    for table in HIGH_ONLY_TABLES.iter().chain(MEDIUM_ONLY_TABLES) {
        assert_eq!(rows_for_reading(&repo, table, low.reading_id).await, 0, "{}", table);
    }
}

#[tokio::test]
async fn storage_partitions_reference_their_disk() {
    let (_dir, repo) = test_repo().await;
    let stored = repo
        .record_submission(&submission("pixel-7", Utc::now(), "medium", medium_data()))
        .await
        .unwrap();

    let rows: Vec<(i64, Option<i64>, i64, String)> = sqlx::query_as(
        "SELECT id, parent_device_id, depth, path FROM storage_devices WHERE reading_id = $1 ORDER BY id",
    )
    .bind(stored.reading_id)
    .fetch_all(repo.pool())
    .await
    .unwrap();
    assert_eq!(rows.len(), 3);

    let disk_id = rows[0].0;
    assert_eq!(rows[0].1, None);
    assert_eq!(rows[0].2, 0);
    assert_eq!(rows[0].3, "/sda");
    assert_eq!(rows[1].1, Some(disk_id));
    assert_eq!(rows[1].3, "/sda/sda1");
    assert_eq!(rows[2].1, Some(disk_id));
    assert_eq!(rows[2].2, 1);
    assert_eq!(rows[2].3, "/sda/sda2");
}

#[tokio::test]
async fn same_device_twice_creates_one_device() {
    let (_dir, repo) = test_repo().await;
    let a = repo
        .record_submission(&submission("pixel-7", Utc::now(), "low", low_data()))
        .await
        .unwrap();
    let b = repo
        .record_submission(&submission("pixel-7", Utc::now(), "low", low_data()))
        .await
        .unwrap();
    assert_eq!(a.device_id, b.device_id);
    assert_ne!(a.reading_id, b.reading_id);
    assert_eq!(count(&repo, "SELECT COUNT(*) FROM devices").await, 1);

    let name: Option<String> = sqlx::query_scalar("SELECT name FROM devices WHERE id = $1")
        .bind(a.device_id)
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(name.as_deref(), Some("pixel-7"));
}

#[tokio::test]
async fn concurrent_first_submissions_create_one_device() {
    let (_dir, repo) = test_repo().await;
    let s1 = submission("new-device", Utc::now(), "low", low_data());
    let s2 = submission("new-device", Utc::now(), "high", high_data());
    let s3 = submission("new-device", Utc::now(), "medium", medium_data());
    let (r1, r2, r3) = tokio::join!(
        repo.record_submission(&s1),
        repo.record_submission(&s2),
        repo.record_submission(&s3),
    );
    let (r1, r2, r3) = (r1.unwrap(), r2.unwrap(), r3.unwrap());
    assert_eq!(r1.device_id, r2.device_id);
    assert_eq!(r2.device_id, r3.device_id);
    assert_eq!(count(&repo, "SELECT COUNT(*) FROM devices").await, 1);
    assert_eq!(count(&repo, "SELECT COUNT(*) FROM readings").await, 3);
}

#[tokio::test]
async fn failed_child_insert_rolls_back_whole_reading() {
    let (_dir, repo) = test_repo().await;
    sqlx::query(
        "CREATE TRIGGER reject_memory BEFORE INSERT ON memory_readings
         BEGIN SELECT RAISE(ABORT, 'memory table unavailable'); END",
    )
    .execute(repo.pool())
    .await
    .unwrap();

    let err = repo
        .record_submission(&submission("pixel-7", Utc::now(), "high", high_data()))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("memory table unavailable"));

    assert_eq!(count(&repo, "SELECT COUNT(*) FROM readings").await, 0);
    assert_eq!(count(&repo, "SELECT COUNT(*) FROM devices").await, 0);
    for table in HIGH_ONLY_TABLES {
        assert_eq!(
            count(&repo, &format!("SELECT COUNT(*) FROM {}", table)).await,
            0,
            "{}",
            table
        );
    }
}

#[tokio::test]
async fn batch_stops_at_first_failure_keeping_earlier_readings() {
    let (_dir, repo) = test_repo().await;
    sqlx::query(
        "CREATE TRIGGER reject_display BEFORE INSERT ON display_readings
         BEGIN SELECT RAISE(ABORT, 'display table unavailable'); END",
    )
    .execute(repo.pool())
    .await
    .unwrap();

    let batch = vec![
        submission("pixel-7", Utc::now(), "high", high_data()),
        submission("pixel-7", Utc::now(), "low", low_data()),
        submission("pixel-7", Utc::now(), "medium", medium_data()),
    ];
    assert!(repo.record_batch(&batch).await.is_err());
    // The high reading committed before the low one failed; the medium one never ran.
    assert_eq!(count(&repo, "SELECT COUNT(*) FROM readings").await, 1);
    assert_eq!(count(&repo, "SELECT COUNT(*) FROM readings WHERE tier = 'high'").await, 1);
}

#[tokio::test]
async fn registry_and_recorder_compose_on_one_connection() {
    let (_dir, repo) = test_repo().await;
    let now = Utc::now();
    let mut conn = repo.pool().acquire().await.unwrap();

    let device_id = telemetry_repo::get_or_create_device(&mut conn, "tablet-1", now)
        .await
        .unwrap();
    let again = telemetry_repo::get_or_create_device(&mut conn, "tablet-1", now + Duration::seconds(5))
        .await
        .unwrap();
    assert_eq!(device_id, again);

    let reading_id =
        telemetry_repo::create_reading(&mut conn, device_id, now, now.timestamp_millis(), Tier::Low, now)
            .await
            .unwrap();
    assert!(reading_id > 0);

    // Unknown device: foreign key violation.
    assert!(
        telemetry_repo::create_reading(&mut conn, device_id + 100, now, 0, Tier::Low, now)
            .await
            .is_err()
    );
}

#[tokio::test]
async fn deleting_a_device_cascades_to_all_child_rows() {
    let (_dir, repo) = test_repo().await;
    for (tier, data) in [("high", high_data()), ("medium", medium_data()), ("low", low_data())] {
        repo.record_submission(&submission("pixel-7", Utc::now(), tier, data))
            .await
            .unwrap();
    }
    sqlx::query("DELETE FROM devices WHERE external_id = 'pixel-7'")
        .execute(repo.pool())
        .await
        .unwrap();

    assert_eq!(count(&repo, "SELECT COUNT(*) FROM readings").await, 0);
    for table in HIGH_ONLY_TABLES
        .iter()
        .chain(MEDIUM_ONLY_TABLES)
        .chain(LOW_ONLY_TABLES)
    {
        assert_eq!(
            count(&repo, &format!("SELECT COUNT(*) FROM {}", table)).await,
            0,
            "{}",
            table
        );
    }
}

#[tokio::test]
async fn reading_summary_counts_child_rows() {
    let (_dir, repo) = test_repo().await;
    let stored = repo
        .record_submission(&submission("pixel-7", Utc::now(), "medium", medium_data()))
        .await
        .unwrap();

    let summary = repo
        .reading_summary(stored.reading_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(summary.device_id, "pixel-7");
    assert_eq!(summary.frequency, Tier::Medium);
    assert_eq!(summary.child_rows.get("storage_devices"), Some(&3));
    assert_eq!(summary.child_rows.get("process_readings"), Some(&20));
    assert_eq!(summary.child_rows.len(), 7);
    assert!(!summary.child_rows.contains_key("battery_readings"));

    assert!(repo.reading_summary(stored.reading_id + 1).await.unwrap().is_none());
}

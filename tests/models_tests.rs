// Model serialization tests (JSON camelCase, tier decoding, field renames)

mod common;

use common::{high_data, low_data, medium_data};
use std::str::FromStr;
use telemetry_server::models::*;

#[test]
fn test_tier_from_str_and_display() {
    for tier in Tier::ALL {
        assert_eq!(Tier::from_str(&tier.to_string()).unwrap(), tier);
    }
    let err = Tier::from_str("ultra").unwrap_err();
    assert_eq!(err, UnknownTier("ultra".into()));
    assert!(Tier::from_str("High").is_err());
}

#[test]
fn test_tier_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Tier::Medium).unwrap(), "\"medium\"");
    let t: Tier = serde_json::from_str("\"low\"").unwrap();
    assert_eq!(t, Tier::Low);
}

#[test]
fn test_tier_data_decodes_by_tier() {
    let high = TierData::from_json(Tier::High, high_data()).unwrap();
    assert_eq!(high.tier(), Tier::High);
    let TierData::High(h) = high else {
        panic!("expected high tier data");
    };
    assert_eq!(h.battery.level, 55);
    assert_eq!(h.battery.current_now, Some(-412_000));
    assert!(h.battery.present);
    assert_eq!(h.memory.total_kb, 7_812_345);
    assert_eq!(h.thermal.zones[0].zone_type, "cpu-0-0");
    assert_eq!(h.cpu.times[0].user, 123_456_789_012);
    assert!(!h.cpu.frequencies[3].online);
    assert!(h.cpu.frequencies[0].online);

    let medium = TierData::from_json(Tier::Medium, medium_data()).unwrap();
    assert_eq!(medium.tier(), Tier::Medium);

    let low = TierData::from_json(Tier::Low, low_data()).unwrap();
    let TierData::Low(l) = low else {
        panic!("expected low tier data");
    };
    assert_eq!(l.rfkill[1].rfkill_type, "bluetooth");
    assert_eq!(l.wakeup.count, 1042);
    assert_eq!(l.sensors.step_count, Some(5231));
    assert!(l.sensors.proximity_cm.is_none());
}

#[test]
fn test_tier_data_rejects_mismatched_shape() {
    assert!(TierData::from_json(Tier::High, low_data()).is_err());
    assert!(TierData::from_json(Tier::Low, medium_data()).is_err());
    assert!(TierData::from_json(Tier::Medium, serde_json::json!([])).is_err());
}

#[test]
fn test_storage_partitions_nest() {
    let TierData::Medium(m) = TierData::from_json(Tier::Medium, medium_data()).unwrap() else {
        panic!("expected medium tier data");
    };
    let sda = &m.storage.devices[0];
    assert_eq!(sda.device_type.as_deref(), Some("disk"));
    assert_eq!(sda.size_bytes, 256_060_514_304);
    assert_eq!(sda.partitions.len(), 2);
    assert_eq!(sda.partitions[1].mount_point.as_deref(), Some("/data"));
    assert!(sda.partitions[0].partitions.is_empty());
}

#[test]
fn test_serialization_camel_case_and_type_rename() {
    let zone = ThermalZoneData {
        zone_id: 3,
        zone_type: "skin".into(),
        temperature: 35.5,
        mode: None,
    };
    let json = serde_json::to_value(&zone).unwrap();
    assert_eq!(json["zoneId"], 3);
    assert_eq!(json["type"], "skin");
    assert!(json.get("zoneType").is_none());

    let display = DisplayData {
        brightness: 10,
        max_brightness: 255,
        screen_on: false,
        refresh_rate: Some(60.0),
        width: None,
        height: None,
    };
    let json = serde_json::to_string(&display).unwrap();
    assert!(json.contains("\"maxBrightness\""));
    assert!(json.contains("\"screenOn\""));
}

#[test]
fn test_acknowledgment_shape() {
    let ack = Acknowledgment {
        received: true,
        id: "42".into(),
        timestamp: "2024-05-01T10:00:00.000Z".into(),
    };
    let json = serde_json::to_value(&ack).unwrap();
    assert_eq!(json["received"], true);
    assert_eq!(json["id"], "42");

    let batch = BatchAcknowledgment {
        received: 2,
        failed: 0,
        ids: vec!["1".into(), "2".into()],
    };
    let json = serde_json::to_value(&batch).unwrap();
    assert_eq!(json["ids"][1], "2");
    assert_eq!(json["failed"], 0);
}

#[test]
fn test_raw_submission_tolerates_missing_fields() {
    let raw: RawSubmission = serde_json::from_str(r#"{"deviceId":"pixel-7"}"#).unwrap();
    assert_eq!(raw.device_id.as_deref(), Some("pixel-7"));
    assert!(raw.timestamp.is_none());
    assert!(raw.data.is_none());
}

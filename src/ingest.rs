// Request validation. Every problem is collected before rejecting, and
// nothing reaches the database until a submission (or a whole batch) is valid.

use crate::models::{RawBatch, RawSubmission, Submission, Tier, TierData};
use crate::timestamp::parse_iso8601;

/// Validate one submission; on failure returns every problem found.
pub fn validate_submission(raw: RawSubmission) -> Result<Submission, Vec<String>> {
    let mut errors = Vec::new();

    let device_id = match raw.device_id {
        None => {
            errors.push("deviceId is required".to_string());
            None
        }
        Some(id) if id.trim().is_empty() => {
            errors.push("deviceId must not be empty".to_string());
            None
        }
        Some(id) => Some(id),
    };

    let timestamp = match raw.timestamp {
        None => {
            errors.push("timestamp is required".to_string());
            None
        }
        Some(ts) => match parse_iso8601(&ts) {
            Some(parsed) => Some((ts, parsed)),
            None => {
                errors.push("timestamp must be an ISO-8601 date-time".to_string());
                None
            }
        },
    };

    let timestamp_ms = match raw.timestamp_ms {
        None | Some(serde_json::Value::Null) => None,
        Some(v) => match timestamp_ms_from_json(&v) {
            Some(ms) => Some(ms),
            None => {
                errors.push("timestampMs must be an integer".to_string());
                None
            }
        },
    };

    let tier = match raw.frequency {
        None => {
            errors.push("frequency is required".to_string());
            None
        }
        Some(f) => match f.parse::<Tier>() {
            Ok(tier) => Some(tier),
            Err(_) => {
                errors.push("frequency must be one of: high, medium, low".to_string());
                None
            }
        },
    };

    let data = match (raw.data, tier) {
        (None, _) | (Some(serde_json::Value::Null), _) => {
            errors.push("data is required".to_string());
            None
        }
        (Some(_), None) => None,
        (Some(value), Some(tier)) => match TierData::from_json(tier, value) {
            Ok(data) => Some(data),
            Err(e) => {
                errors.push(format!("data does not match the {} payload shape: {}", tier, e));
                None
            }
        },
    };

    match (device_id, timestamp, data) {
        (Some(device_id), Some((timestamp_raw, timestamp)), Some(data)) if errors.is_empty() => {
            Ok(Submission {
                device_id,
                timestamp,
                timestamp_ms: timestamp_ms.unwrap_or_else(|| timestamp.timestamp_millis()),
                timestamp_raw,
                data,
            })
        }
        _ => Err(errors),
    }
}

/// Validate a batch. Any invalid element rejects the whole batch; problems are
/// prefixed with `payloads[i]: `.
pub fn validate_batch(batch: RawBatch, max_batch_size: usize) -> Result<Vec<Submission>, Vec<String>> {
    let items = match batch.payloads {
        Some(serde_json::Value::Array(items)) => items,
        Some(serde_json::Value::Null) | None => {
            return Err(vec!["payloads is required".to_string()]);
        }
        Some(_) => return Err(vec!["payloads must be an array".to_string()]),
    };
    if items.is_empty() {
        return Err(vec!["payloads must not be empty".to_string()]);
    }
    if items.len() > max_batch_size {
        return Err(vec![format!(
            "payloads has {} entries, at most {} are accepted per batch",
            items.len(),
            max_batch_size
        )]);
    }

    let mut errors = Vec::new();
    let mut submissions = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        let raw = match serde_json::from_value::<RawSubmission>(item) {
            Ok(raw) => raw,
            Err(e) => {
                errors.push(format!("payloads[{}]: {}", i, e));
                continue;
            }
        };
        match validate_submission(raw) {
            Ok(s) => submissions.push(s),
            Err(errs) => errors.extend(errs.into_iter().map(|e| format!("payloads[{}]: {}", i, e))),
        }
    }

    if errors.is_empty() {
        Ok(submissions)
    } else {
        Err(errors)
    }
}

fn timestamp_ms_from_json(v: &serde_json::Value) -> Option<i64> {
    match v {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

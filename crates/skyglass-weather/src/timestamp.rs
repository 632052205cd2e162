//! Epoch timestamp handling.
//!
//! The contract carries every timestamp in epoch seconds. Upstream
//! producers are known to emit milliseconds for the same fields, so
//! values large enough to only make sense as milliseconds are scaled down.

use serde::{Deserialize, Deserializer};

/// Smallest magnitude treated as milliseconds (~ year 5138 in seconds,
/// ~ 1973 in milliseconds).
pub const MILLISECOND_THRESHOLD: i64 = 100_000_000_000;

/// Normalize a raw epoch value to seconds
pub fn normalize_epoch_seconds(raw: i64) -> i64 {
    if raw.unsigned_abs() >= MILLISECOND_THRESHOLD.unsigned_abs() {
        raw / 1000
    } else {
        raw
    }
}

/// Deserialize an optional epoch timestamp given as an integer or float,
/// normalized to seconds. `null`, non-finite values and values outside
/// the `i64` range become `None`.
pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw
        .filter(|v| v.is_finite() && v.abs() < I64_LIMIT)
        .map(|v| normalize_epoch_seconds(v as i64)))
}

/// 2^63; every float strictly below it in magnitude fits an `i64`
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

use std::time::{SystemTime, UNIX_EPOCH};

use twilight_model::util::Timestamp;

/// Current unix time in whole seconds, or `0` if the clock is before the epoch.
pub fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}

/// Current time as an embed timestamp.
///
/// Returns `None` only when the system clock cannot be represented.
pub fn now_timestamp() -> Option<Timestamp> {
    let secs = i64::try_from(now_unix_secs()).ok()?;
    Timestamp::from_secs(secs).ok()
}

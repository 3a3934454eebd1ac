//! Timestamp utilities

use chrono::{DateTime, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Current time as Unix epoch milliseconds
///
/// Used for identifiers of records that exist only locally (placeholder
/// centers) and for uploaded object names.
pub fn epoch_millis() -> i64 {
    Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_now_returns_valid_timestamp() {
        let timestamp = now();
        // Should be a reasonable timestamp (after year 2000)
        assert!(timestamp.timestamp() > 946_684_800); // 2000-01-01 00:00:00 UTC
    }

    #[test]
    fn test_epoch_millis_matches_now() {
        let before = now().timestamp_millis();
        let millis = epoch_millis();
        let after = now().timestamp_millis();
        assert!(millis >= before && millis <= after);
    }

    #[tokio::test]
    async fn test_epoch_millis_advances() {
        let first = epoch_millis();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let second = epoch_millis();
        assert!(second > first);
    }
}

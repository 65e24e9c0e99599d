//! AWS SDK implementations of [`BlockchainApi`](super::BlockchainApi) and
//! [`QueryApi`](super::QueryApi)

mod admin;
mod query;

pub use admin::SdkBlockchain;
pub use query::SdkQuery;

use aws_sdk_managedblockchain::primitives::DateTime as SdkDateTime;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::model::Tags;

/// Smithy timestamp to UTC
pub(crate) fn to_utc(timestamp: &SdkDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp.secs(), timestamp.subsec_nanos())
}

pub(crate) fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

pub(crate) fn tags(value: Option<&HashMap<String, String>>) -> Tags {
    value.cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_utc_keeps_subsecond_precision() {
        let ts = SdkDateTime::from_secs_and_nanos(1_700_000_000, 500_000_000);
        let utc = to_utc(&ts).unwrap();
        assert_eq!(utc.timestamp(), 1_700_000_000);
        assert_eq!(utc.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn test_tags_default_to_empty() {
        assert!(tags(None).is_empty());
        let mut map = HashMap::new();
        map.insert("env".to_string(), "dev".to_string());
        assert_eq!(tags(Some(&map)).get("env").map(String::as_str), Some("dev"));
    }
}

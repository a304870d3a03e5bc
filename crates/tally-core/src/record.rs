//! The counter entity.
//!
//! Wire/storage field names (`PartitionKey`, `RowKey`, `count`) follow the
//! wide-table entity shape the service was originally persisted with, so a
//! `file:` store written by one deployment stays readable by the next.

use serde::{Deserialize, Serialize};

/// Partition key grouping all counter rows.
pub const PARTITION_KEY: &str = "counter";
/// Row key of the single visitor counter.
pub const ROW_KEY: &str = "visitors";

/// The sole persisted entity: one row holding a non-negative visit count.
///
/// At most one record exists per (partition, row) pair. The count is
/// monotonically non-decreasing across successful requests; the record is
/// created on first visit and replaced wholesale on every later one, never
/// deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterRecord {
    #[serde(rename = "PartitionKey")]
    pub partition_key: String,
    #[serde(rename = "RowKey")]
    pub row_key: String,
    pub count: u64,
}

impl CounterRecord {
    /// Record written when no counter row exists yet.
    pub fn first_visit() -> Self {
        Self {
            partition_key: PARTITION_KEY.to_string(),
            row_key: ROW_KEY.to_string(),
            count: 1,
        }
    }

    /// Apply one visit. Saturating: an (externally tampered) u64::MAX row
    /// must not panic the handler.
    pub fn increment(&mut self) {
        self.count = self.count.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn first_visit_starts_at_one() {
        let rec = CounterRecord::first_visit();
        assert_eq!(rec.partition_key, "counter");
        assert_eq!(rec.row_key, "visitors");
        assert_eq!(rec.count, 1);
    }

    #[test]
    fn increment_is_monotonic() {
        let mut rec = CounterRecord::first_visit();
        rec.increment();
        rec.increment();
        assert_eq!(rec.count, 3);
    }

    #[test]
    fn increment_saturates_instead_of_panicking() {
        let mut rec = CounterRecord::first_visit();
        rec.count = u64::MAX;
        rec.increment();
        assert_eq!(rec.count, u64::MAX);
    }

    #[test]
    fn entity_field_names_match_table_shape() {
        let rec = CounterRecord::first_visit();
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["PartitionKey"], "counter");
        assert_eq!(json["RowKey"], "visitors");
        assert_eq!(json["count"], 1);
    }
}

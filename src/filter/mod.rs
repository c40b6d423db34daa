//! Recency window over the synchronized item list.

use chrono::{DateTime, Utc};

use crate::domain::Item;

/// Items no older than `filter_days` whole days, in their original order.
///
/// `filter_days == 0` disables filtering.
pub fn filter_items(items: &[Item], filter_days: u32, now: DateTime<Utc>) -> Vec<&Item> {
    items
        .iter()
        .filter(|item| filter_days == 0 || item.age_days(now) <= i64::from(filter_days))
        .collect()
}

/// Parse the day-filter prompt. Anything that is not a non-negative integer
/// means "no filter".
pub fn parse_days(input: &str) -> u32 {
    input.parse::<u32>().unwrap_or(0)
}

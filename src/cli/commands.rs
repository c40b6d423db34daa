use chrono::{DateTime, Utc};

use crate::app::{AppContext, Result};
use crate::domain::Item;
use crate::filter::filter_items;
use crate::sync::synchronize;

/// Fetch the feed and print it. The seen-state is read, never written.
pub async fn list_items(ctx: &AppContext, days: u32, only_new: bool) -> Result<()> {
    let seen = ctx.store.load();
    let items = synchronize(ctx.fetch_items().await?, &seen);

    let lines = format_items(&items, days, only_new, Utc::now());
    if lines.is_empty() {
        println!("No items");
        return Ok(());
    }

    for line in lines {
        println!("{}", line);
    }

    Ok(())
}

pub fn format_items(items: &[Item], days: u32, only_new: bool, now: DateTime<Utc>) -> Vec<String> {
    filter_items(items, days, now)
        .into_iter()
        .filter(|item| !only_new || item.is_new)
        .map(|item| {
            let marker = if item.is_new { "●" } else { " " };
            format!(
                "{} {} {}",
                marker,
                item.pub_date.format("%Y-%m-%d"),
                item.display_title()
            )
        })
        .collect()
}

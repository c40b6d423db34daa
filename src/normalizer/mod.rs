pub mod date;

use chrono::{DateTime, Utc};
use html_escape::decode_html_entities;

use crate::domain::{Item, RawEntry};

pub use date::{parse_pub_date, parse_pub_date_with_format, DateFormat};

#[derive(Clone)]
pub struct Normalizer;

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self
    }

    /// Convert raw entries into items, newest first.
    pub fn normalize(&self, entries: Vec<RawEntry>) -> Vec<Item> {
        self.normalize_at(entries, Utc::now())
    }

    /// Same as [`normalize`](Self::normalize) with an explicit fallback time
    /// for entries whose date cannot be parsed.
    pub fn normalize_at(&self, entries: Vec<RawEntry>, now: DateTime<Utc>) -> Vec<Item> {
        let mut items: Vec<Item> = entries
            .into_iter()
            .map(|entry| Item {
                title: decode_html_entities(entry.title.trim()).to_string(),
                link: entry.link.trim().to_string(),
                summary: decode_html_entities(&strip_markup(&entry.description)).to_string(),
                pub_date: parse_pub_date(&entry.pub_date, now),
                guid: entry.guid,
                is_new: false,
            })
            .collect();

        // stable: equal timestamps keep feed order
        items.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
        items
    }
}

/// Drop everything from `<` through the next `>`, then trim.
///
/// Works on characters, not markup structure: an unclosed `<` hides the rest
/// of the text.
pub fn strip_markup(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;

    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result.trim().to_string()
}

use chrono::{DateTime, Utc};

/// An entry exactly as the feed delivered it, before any normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub title: String,
    pub link: String,
    pub description: String,
    pub pub_date: String,
    pub guid: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub guid: String,
    pub title: String,
    pub link: String,
    pub summary: String,
    pub pub_date: DateTime<Utc>,
    pub is_new: bool,
}

impl Item {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(Untitled)"
        } else {
            &self.title
        }
    }

    /// Whole days elapsed between publication and `now`, truncated toward zero.
    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.pub_date).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn item(title: &str, pub_date: DateTime<Utc>) -> Item {
        Item {
            guid: "g".into(),
            title: title.into(),
            link: "https://example.com".into(),
            summary: String::new(),
            pub_date,
            is_new: false,
        }
    }

    #[test]
    fn test_display_title_with_title() {
        assert_eq!(item("Launch", Utc::now()).display_title(), "Launch");
    }

    #[test]
    fn test_display_title_without_title() {
        assert_eq!(item("", Utc::now()).display_title(), "(Untitled)");
    }

    #[test]
    fn test_age_days_truncates() {
        let now = Utc::now();
        assert_eq!(item("a", now - Duration::hours(47)).age_days(now), 1);
        assert_eq!(item("a", now - Duration::hours(48)).age_days(now), 2);
        assert_eq!(item("a", now + Duration::hours(5)).age_days(now), 0);
    }
}

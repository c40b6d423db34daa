//! Classifies fetched items as new or already seen.

use crate::domain::{Item, SeenState};

/// New means never acknowledged and published after the last saved run.
pub fn is_new(item: &Item, state: &SeenState) -> bool {
    !state.is_seen(&item.guid) && state.last_run.map_or(true, |last| item.pub_date > last)
}

/// Recompute `is_new` for every item against `state`.
pub fn synchronize(items: Vec<Item>, state: &SeenState) -> Vec<Item> {
    items
        .into_iter()
        .map(|mut item| {
            item.is_new = is_new(&item, state);
            item
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};

    fn item(guid: &str, pub_date: DateTime<Utc>) -> Item {
        Item {
            guid: guid.into(),
            title: guid.into(),
            link: String::new(),
            summary: String::new(),
            pub_date,
            is_new: false,
        }
    }

    #[test]
    fn test_fresh_item_with_empty_store_is_new() {
        let state = SeenState::default();
        let items = synchronize(vec![item("a", Utc::now())], &state);
        assert!(items[0].is_new);
    }

    #[test]
    fn test_seen_overrides_recency() {
        let now = Utc::now();
        let mut state = SeenState::default();
        state.mark_seen("a");
        state.last_run = Some(now - Duration::days(1));

        let items = synchronize(vec![item("a", now)], &state);
        assert!(!items[0].is_new);
    }

    #[test]
    fn test_old_unseen_item_is_not_new() {
        let now = Utc::now();
        let state = SeenState {
            last_run: Some(now),
            ..Default::default()
        };

        let items = synchronize(
            vec![item("older", now - Duration::hours(1)), item("same", now)],
            &state,
        );
        assert!(!items[0].is_new);
        assert!(!items[1].is_new);
    }

    #[test]
    fn test_new_item_law() {
        let now = Utc::now();
        let mut state = SeenState {
            last_run: Some(now - Duration::days(2)),
            ..Default::default()
        };
        state.mark_seen("seen-recent");
        state.mark_seen("seen-old");

        let items = synchronize(
            vec![
                item("seen-recent", now),
                item("seen-old", now - Duration::days(5)),
                item("unseen-recent", now - Duration::days(1)),
                item("unseen-old", now - Duration::days(3)),
            ],
            &state,
        );

        for item in &items {
            let expected =
                !state.is_seen(&item.guid) && item.pub_date > state.last_run.unwrap();
            assert_eq!(item.is_new, expected, "{}", item.guid);
        }
        assert_eq!(
            items.iter().filter(|i| i.is_new).map(|i| i.guid.as_str()).collect::<Vec<_>>(),
            vec!["unseen-recent"]
        );
    }

    #[test]
    fn test_synchronize_resets_stale_flags() {
        let mut state = SeenState::default();
        state.mark_seen("a");
        let mut stale = item("a", Utc::now());
        stale.is_new = true;
        assert!(!synchronize(vec![stale], &state)[0].is_new);
    }
}

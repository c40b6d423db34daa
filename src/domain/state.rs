use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Acknowledgment flags keyed by GUID, plus the time of the last save.
///
/// `last_run == None` means no session has saved yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeenState {
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_seen: HashMap<String, bool>,
    #[serde(default)]
    pub last_run: Option<DateTime<Utc>>,
}

impl SeenState {
    pub fn is_seen(&self, guid: &str) -> bool {
        self.last_seen.contains_key(guid)
    }

    pub fn mark_seen(&mut self, guid: &str) {
        self.last_seen.insert(guid.to_string(), true);
    }

    pub fn mark_all_seen<I, S>(&mut self, guids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for guid in guids {
            self.mark_seen(guid.as_ref());
        }
    }

    /// A copy holding only the entries whose GUID is in `current`.
    ///
    /// Always rebuilds the mapping so no stale key survives.
    pub fn pruned<I, S>(&self, current: I) -> SeenState
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let current: HashSet<String> = current
            .into_iter()
            .map(|g| g.as_ref().to_string())
            .collect();

        let last_seen = self
            .last_seen
            .iter()
            .filter(|(guid, _)| current.contains(guid.as_str()))
            .map(|(guid, seen)| (guid.clone(), *seen))
            .collect();

        SeenState {
            last_seen,
            last_run: self.last_run,
        }
    }

    /// Move `last_run` to `now` unless it is already later.
    pub fn advance_last_run(&mut self, now: DateTime<Utc>) {
        self.last_run = Some(match self.last_run {
            Some(prev) if prev > now => prev,
            _ => now,
        });
    }

    pub fn len(&self) -> usize {
        self.last_seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_seen.is_empty()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

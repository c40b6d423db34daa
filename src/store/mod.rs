pub mod json;

use chrono::Utc;

use crate::app::Result;
use crate::domain::SeenState;

pub use json::JsonStore;

pub trait StateStore {
    /// Read the persisted state. Never fails: unreadable state is empty state.
    fn load(&self) -> SeenState;

    fn save(&self, state: &SeenState) -> Result<()>;

    /// Keep only `current` GUIDs, stamp the run time and persist.
    ///
    /// Returns the state that was written.
    fn prune_and_save(&self, state: &SeenState, current: &[String]) -> Result<SeenState> {
        let mut pruned = state.pruned(current);
        pruned.advance_last_run(Utc::now());
        self.save(&pruned)?;
        tracing::info!("Saved seen-state with {} entries", pruned.len());
        Ok(pruned)
    }
}

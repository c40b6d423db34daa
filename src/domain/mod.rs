pub mod item;
pub mod state;

pub use item::{Item, RawEntry};
pub use state::SeenState;

pub mod config;
pub mod dates;
pub mod error;
pub mod history;
pub mod io;
pub mod item;
pub mod paths;
pub mod propagate;
pub mod reindex;
pub mod schedule;
pub mod store;
pub mod structure;
pub mod types;

pub use error::{PlanError, Result};
pub use history::{History, HISTORY_CAPACITY};
pub use item::{ItemId, ItemPatch, ItemSeed, WorkItem};
pub use propagate::apply_edit;
pub use reindex::reindex;
pub use schedule::Schedule;
pub use structure::{append_phase, delete_item, insert_task_after, move_item};
pub use types::{ItemKind, LinkMode};

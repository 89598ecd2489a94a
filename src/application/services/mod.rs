pub mod notification_manager;
pub mod sync_policy;
pub mod view_store;

pub use notification_manager::NotificationManager;
pub use sync_policy::{SYNC_RULES, SyncRule, reload_after};
pub use view_store::{ApplyOutcome, RequestToken, Slice, SliceStatus, ViewStore};

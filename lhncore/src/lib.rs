pub mod error;
pub mod filter;
pub mod permissions;
pub mod snapshot;
pub mod types;

pub use filter::{Decision, Reason, decide, select_visible};
pub use snapshot::SidebarSnapshot;

// Core types and the visibility filter live in lhncore
pub use lhncore::{SidebarSnapshot, filter, permissions, types};

pub mod config;
pub mod error;
pub mod hydrate;
pub mod keys;
pub mod sidebar;
pub mod store;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::SidebarConfig;
pub use error::SidebarError;
pub use sidebar::{Sidebar, SidebarRow};
pub use store::KeyValueStore;

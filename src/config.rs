use crate::error::{Result, SidebarError};
use lhncore::types::DisplayMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SidebarConfig {
    /// Used while the viewer's priority mode has not been loaded.
    pub default_display_mode: DisplayMode,
    /// Upper bound on listed rows. `0` lists everything.
    pub max_rows: usize,
}

impl SidebarConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SidebarError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SidebarError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

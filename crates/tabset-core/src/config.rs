//! Widget configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use tabset_tabs::ReplacementSelect;

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabsetConfig {
    /// Callback policy for the tab auto-selected after the active one is removed
    pub replacement_select: ReplacementSelect,
    /// Cache a pane's interactive state while its tab is inactive
    pub retain_pane_state: bool,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl TabsetConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;

        tracing::debug!(path = %path.display(), ?config, "Loaded config");

        Ok(config)
    }
}

impl Default for TabsetConfig {
    fn default() -> Self {
        Self {
            replacement_select: ReplacementSelect::Silent,
            retain_pane_state: true,
            log_filter: "info".to_string(),
        }
    }
}

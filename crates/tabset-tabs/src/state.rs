//! Tab display state
//!
//! Derived from a tab's `active` and `disabled` flags:
//! ```text
//! Inactive --select--> Active
//! Active --select other / deselect--> Inactive
//! Disabled (click path blocked, direct assignment still allowed)
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabState {
    /// Tab is selected and its pane is mounted
    Active,
    /// Tab is registered but not selected
    Inactive,
    /// Tab cannot be entered by a click
    Disabled,
}

impl TabState {
    pub fn from_flags(active: bool, disabled: bool) -> Self {
        // An assigned-active disabled tab still renders as active
        match (active, disabled) {
            (true, _) => TabState::Active,
            (false, true) => TabState::Disabled,
            (false, false) => TabState::Inactive,
        }
    }

    /// Returns true if a click on the header may select this tab
    pub fn is_selectable(&self) -> bool {
        matches!(self, TabState::Inactive)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TabState::Active => "active",
            TabState::Inactive => "inactive",
            TabState::Disabled => "disabled",
        }
    }
}

impl std::fmt::Display for TabState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TabState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(TabState::Active),
            "inactive" => Ok(TabState::Inactive),
            "disabled" => Ok(TabState::Disabled),
            _ => Err(format!("Unknown tab state: {}", s)),
        }
    }
}

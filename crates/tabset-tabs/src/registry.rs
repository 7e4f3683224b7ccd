//! Tab Registry
//!
//! Owns the ordered tab sequence of one tab group and mediates every
//! activation change.

use serde::{Deserialize, Serialize};

use crate::error::TabError;
use crate::tab::{Heading, SelectCallback, Tab, TabInfo};
use crate::Result;

/// Whether the tab auto-selected after removing the active tab gets its
/// select callback fired
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplacementSelect {
    /// Replacement becomes active without a callback
    #[default]
    Silent,
    /// Replacement is treated like a regular selection
    Notify,
}

#[derive(Debug, Default)]
pub struct TabRegistry {
    /// Tabs in rendering order
    tabs: Vec<Tab>,
    replacement: ReplacementSelect,
    /// Bumped on every mutation
    revision: u64,
}

impl TabRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replacement(replacement: ReplacementSelect) -> Self {
        Self {
            replacement,
            ..Self::default()
        }
    }

    pub fn replacement(&self) -> ReplacementSelect {
        self.replacement
    }

    pub fn set_replacement(&mut self, replacement: ReplacementSelect) {
        self.replacement = replacement;
    }

    /// Insert a tab at `at_index` (clamped), or append when `None`.
    ///
    /// The first tab added to an empty registry becomes active and its
    /// select callback fires.
    pub fn add_tab(&mut self, mut tab: Tab, at_index: Option<usize>) -> Result<String> {
        if self.position(tab.id()).is_some() {
            tracing::warn!(tab_id = %tab.id(), "Rejected duplicate tab");
            return Err(TabError::Duplicate(tab.id().to_string()));
        }

        let was_empty = self.tabs.is_empty();
        let index = at_index
            .map(|i| i.min(self.tabs.len()))
            .unwrap_or(self.tabs.len());
        let id = tab.id().to_string();

        // A tab removed from another registry may still carry its flag
        tab.deactivate();
        self.tabs.insert(index, tab);
        self.revision += 1;

        tracing::info!(tab_id = %id, index, "Added tab");

        if was_empty {
            self.tabs[index].activate(true);
        }

        Ok(id)
    }

    /// Remove a tab, returning it (inactive) if it was registered.
    ///
    /// When the active tab goes away, the tab now at the same position
    /// (or the new last tab) takes over.
    pub fn remove_tab(&mut self, tab_id: &str) -> Option<Tab> {
        let index = self.position(tab_id)?;
        let mut tab = self.tabs.remove(index);
        self.revision += 1;

        tracing::info!(tab_id = %tab_id, index, "Removed tab");

        if tab.is_active() && !self.tabs.is_empty() {
            let next = index.min(self.tabs.len() - 1);
            let notify = self.replacement == ReplacementSelect::Notify;
            self.tabs[next].activate(notify);
        }

        tab.deactivate();
        Some(tab)
    }

    /// Select a tab the way a header click does.
    ///
    /// Returns false without touching state if the tab is unknown,
    /// disabled, or already active.
    pub fn select(&mut self, tab_id: &str) -> bool {
        let Some(index) = self.position(tab_id) else {
            return false;
        };

        if !self.tabs[index].state().is_selectable() {
            tracing::debug!(
                tab_id = %tab_id,
                state = %self.tabs[index].state(),
                "Ignored select"
            );
            return false;
        }

        self.activate_at(index)
    }

    /// Direct assignment of a tab's active flag.
    ///
    /// `true` selects the tab even if it is disabled. `false` clears the
    /// flag and leaves no tab active.
    pub fn assign_active(&mut self, tab_id: &str, active: bool) -> bool {
        let Some(index) = self.position(tab_id) else {
            return false;
        };

        match (active, self.tabs[index].is_active()) {
            (true, false) => self.activate_at(index),
            (false, true) => {
                self.tabs[index].deactivate();
                self.revision += 1;
                true
            }
            _ => false,
        }
    }

    pub fn deselect_all(&mut self) {
        if self.active_index().is_some() {
            self.tabs.iter_mut().for_each(Tab::deactivate);
            self.revision += 1;
        }
    }

    /// Move a tab to a new position; activation is untouched
    pub fn move_tab(&mut self, tab_id: &str, new_index: usize) -> bool {
        let Some(current) = self.position(tab_id) else {
            return false;
        };

        let tab = self.tabs.remove(current);
        let target = new_index.min(self.tabs.len());
        self.tabs.insert(target, tab);

        if target != current {
            self.revision += 1;
        }
        true
    }

    pub fn set_disabled(&mut self, tab_id: &str, disabled: bool) -> bool {
        match self.get_mut(tab_id) {
            Some(tab) => {
                tab.set_disabled(disabled);
                self.revision += 1;
                true
            }
            None => false,
        }
    }

    pub fn set_heading(&mut self, tab_id: &str, heading: Heading) -> bool {
        match self.get_mut(tab_id) {
            Some(tab) if *tab.heading() != heading => {
                tab.set_heading(heading);
                self.revision += 1;
                true
            }
            _ => false,
        }
    }

    /// Replace a registered tab's select callback
    pub fn set_on_select(&mut self, tab_id: &str, callback: SelectCallback) -> bool {
        match self.get_mut(tab_id) {
            Some(tab) => {
                tab.set_on_select(callback);
                true
            }
            None => false,
        }
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    pub fn get(&self, tab_id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id() == tab_id)
    }

    pub fn position(&self, tab_id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id() == tab_id)
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.is_active())
    }

    pub fn active_index(&self) -> Option<usize> {
        self.tabs.iter().position(|t| t.is_active())
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn infos(&self) -> Vec<TabInfo> {
        self.tabs.iter().map(Tab::info).collect()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn get_mut(&mut self, tab_id: &str) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id() == tab_id)
    }

    fn activate_at(&mut self, index: usize) -> bool {
        for (i, tab) in self.tabs.iter_mut().enumerate() {
            if i != index {
                tab.deactivate();
            }
        }
        self.tabs[index].activate(true);
        self.revision += 1;
        true
    }
}

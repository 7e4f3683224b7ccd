//! Content pane mounting
//!
//! Only the active tab's pane is mounted. Inactive panes are detached,
//! and their interactive state survives only through the per-tab cache.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pane {
    tab_id: String,
    body: String,
    /// Interactive state, e.g. text typed into inputs
    fields: BTreeMap<String, String>,
}

impl Pane {
    pub fn tab_id(&self) -> &str {
        &self.tab_id
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }
}

#[derive(Debug, Default)]
pub struct PaneHost {
    retain_state: bool,
    /// Pane bodies by tab id
    bodies: HashMap<String, String>,
    mounted: Option<Pane>,
    /// Detached field state by tab id
    cache: HashMap<String, BTreeMap<String, String>>,
}

impl PaneHost {
    pub fn new(retain_state: bool) -> Self {
        Self {
            retain_state,
            ..Self::default()
        }
    }

    pub fn set_body(&mut self, tab_id: &str, body: String) {
        if let Some(pane) = self.mounted.as_mut().filter(|p| p.tab_id == tab_id) {
            pane.body.clone_from(&body);
        }
        self.bodies.insert(tab_id.to_string(), body);
    }

    /// Drop everything known about a tab that left the registry
    pub fn forget(&mut self, tab_id: &str) {
        self.bodies.remove(tab_id);
        self.cache.remove(tab_id);
        if self.mounted.as_ref().is_some_and(|p| p.tab_id == tab_id) {
            tracing::debug!(tab_id = %tab_id, "Unmounted pane of removed tab");
            self.mounted = None;
        }
    }

    /// Mount the pane of `active`, detaching whatever was mounted before
    pub fn sync(&mut self, active: Option<&str>) {
        if self.mounted.as_ref().map(|p| p.tab_id.as_str()) == active {
            return;
        }

        if let Some(pane) = self.mounted.take() {
            tracing::debug!(tab_id = %pane.tab_id, retained = self.retain_state, "Detached pane");
            if self.retain_state {
                self.cache.insert(pane.tab_id, pane.fields);
            }
        }

        if let Some(tab_id) = active {
            let fields = self.cache.remove(tab_id).unwrap_or_default();
            let body = self.bodies.get(tab_id).cloned().unwrap_or_default();

            tracing::debug!(tab_id = %tab_id, "Mounted pane");

            self.mounted = Some(Pane {
                tab_id: tab_id.to_string(),
                body,
                fields,
            });
        }
    }

    pub fn mounted(&self) -> Option<&Pane> {
        self.mounted.as_ref()
    }

    pub fn mounted_mut(&mut self) -> Option<&mut Pane> {
        self.mounted.as_mut()
    }

    pub fn retains_state(&self) -> bool {
        self.retain_state
    }
}

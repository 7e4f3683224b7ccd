//! Tabset rendering surface
//!
//! Translates template structure, collection changes and header clicks
//! into registry calls, then projects registry state into a header strip
//! and a single mounted pane.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use tabset_tabs::{Heading, Tab, TabRegistry, TabState};

use crate::config::TabsetConfig;
use crate::error::CoreError;
use crate::pane::{Pane, PaneHost};
use crate::template::{interpolate, RepeatItem, TabsetTemplate, TemplateEntry};
use crate::Result;

type SelectHandler = Arc<dyn Fn(&str) + Send + Sync>;

/// Position of a tab in the template: entry index plus item key for
/// repeated entries
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SlotKey {
    entry: usize,
    item: Option<String>,
}

/// Collection name plus item key
type ItemKey = (String, String);

struct DesiredSlot {
    key: SlotKey,
    heading: Heading,
    content: String,
    disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderView {
    pub tab_id: String,
    pub title: String,
    pub markup: Option<String>,
    pub state: TabState,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaneView {
    pub tab_id: String,
    pub body: String,
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedTabset {
    pub headers: Vec<HeaderView>,
    pub pane: Option<PaneView>,
}

pub struct TabsetSurface {
    template: TabsetTemplate,
    registry: TabRegistry,
    /// Tab id per template slot
    slots: HashMap<SlotKey, String>,
    collections: HashMap<String, Vec<RepeatItem>>,
    /// `active` value each bound item received at the last write-back
    written: HashMap<ItemKey, bool>,
    panes: PaneHost,
    hidden_headings: HashSet<String>,
    handlers: HashMap<usize, SelectHandler>,
}

impl TabsetSurface {
    /// Build the surface and materialize the static entries
    pub fn new(template: TabsetTemplate, config: &TabsetConfig) -> Result<Self> {
        template.validate()?;

        let mut surface = Self {
            template,
            registry: TabRegistry::with_replacement(config.replacement_select),
            slots: HashMap::new(),
            collections: HashMap::new(),
            written: HashMap::new(),
            panes: PaneHost::new(config.retain_pane_state),
            hidden_headings: HashSet::new(),
            handlers: HashMap::new(),
        };

        surface.reconcile()?;

        tracing::info!(
            entries = surface.template.entries.len(),
            tabs = surface.registry.len(),
            "Tabset mounted"
        );

        Ok(surface)
    }

    /// Replace a collection and reconcile the tabs generated from it
    pub fn set_collection(&mut self, name: &str, items: Vec<RepeatItem>) -> Result<()> {
        let mut seen = HashSet::new();
        if let Some(item) = items.iter().find(|i| !seen.insert(i.key.as_str())) {
            return Err(CoreError::Config(format!(
                "duplicate key {:?} in collection {:?}",
                item.key, name
            )));
        }

        self.collections.insert(name.to_string(), items);
        self.reconcile()
    }

    /// Mutate a collection in place, then reconcile
    pub fn update_collection<F>(&mut self, name: &str, f: F) -> Result<()>
    where
        F: FnOnce(&mut Vec<RepeatItem>),
    {
        let mut items = self.collections.get(name).cloned().unwrap_or_default();
        f(&mut items);
        self.set_collection(name, items)
    }

    /// Collection items with `active` flags written back from the registry
    pub fn collection(&self, name: &str) -> Option<&[RepeatItem]> {
        self.collections.get(name).map(Vec::as_slice)
    }

    /// Attach a select handler to every tab produced by a template entry
    pub fn on_select<F>(&mut self, entry: usize, handler: F) -> bool
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        if entry >= self.template.entries.len() {
            return false;
        }

        let handler: SelectHandler = Arc::new(handler);
        for (key, tab_id) in &self.slots {
            if key.entry == entry {
                self.registry.set_on_select(tab_id, wrap_handler(&handler));
            }
        }
        self.handlers.insert(entry, handler);
        true
    }

    /// Header click at `position` in the strip
    pub fn click(&mut self, position: usize) -> bool {
        let Some(tab_id) = self.registry.tabs().get(position).map(|t| t.id().to_string()) else {
            return false;
        };
        self.select(&tab_id)
    }

    pub fn select(&mut self, tab_id: &str) -> bool {
        let changed = self.registry.select(tab_id);
        self.sync();
        changed
    }

    pub fn assign_active(&mut self, tab_id: &str, active: bool) -> bool {
        let changed = self.registry.assign_active(tab_id, active);
        self.sync();
        changed
    }

    pub fn deselect_all(&mut self) {
        self.registry.deselect_all();
        self.sync();
    }

    pub fn set_disabled(&mut self, tab_id: &str, disabled: bool) -> bool {
        let changed = self.registry.set_disabled(tab_id, disabled);
        self.sync();
        changed
    }

    /// Hide or show a header without unregistering its tab
    pub fn set_heading_visible(&mut self, tab_id: &str, visible: bool) -> bool {
        if self.registry.get(tab_id).is_none() {
            return false;
        }
        if visible {
            self.hidden_headings.remove(tab_id);
        } else {
            self.hidden_headings.insert(tab_id.to_string());
        }
        true
    }

    /// Id of the tab generated for a template entry (and item key)
    pub fn tab_id(&self, entry: usize, key: Option<&str>) -> Option<&str> {
        let key = SlotKey {
            entry,
            item: key.map(str::to_string),
        };
        self.slots.get(&key).map(String::as_str)
    }

    pub fn registry(&self) -> &TabRegistry {
        &self.registry
    }

    pub fn template(&self) -> &TabsetTemplate {
        &self.template
    }

    pub fn active_pane(&self) -> Option<&Pane> {
        self.panes.mounted()
    }

    pub fn active_pane_mut(&mut self) -> Option<&mut Pane> {
        self.panes.mounted_mut()
    }

    pub fn titles(&self) -> Vec<String> {
        self.registry.iter().map(Tab::title).collect()
    }

    pub fn render(&self) -> RenderedTabset {
        let headers = self
            .registry
            .iter()
            .map(|tab| HeaderView {
                tab_id: tab.id().to_string(),
                title: tab.title(),
                markup: tab.heading().markup_source().map(str::to_string),
                state: tab.state(),
                visible: !self.hidden_headings.contains(tab.id()),
            })
            .collect();

        let pane = self.panes.mounted().map(|pane| PaneView {
            tab_id: pane.tab_id().to_string(),
            body: pane.body().to_string(),
            fields: pane.fields().clone(),
        });

        RenderedTabset { headers, pane }
    }

    /// Bring the registry in line with the template and collections
    fn reconcile(&mut self) -> Result<()> {
        let desired = self.desired_slots();
        let wanted: HashSet<&SlotKey> = desired.iter().map(|d| &d.key).collect();

        let mut vanished: Vec<SlotKey> = self
            .slots
            .keys()
            .filter(|key| !wanted.contains(key))
            .cloned()
            .collect();

        // Back to front, so a removed active tab hands over to the nearest
        // surviving tab after it
        vanished.sort_by_key(|key| {
            std::cmp::Reverse(
                self.slots
                    .get(key)
                    .and_then(|tab_id| self.registry.position(tab_id)),
            )
        });

        for key in &vanished {
            if let Some(tab_id) = self.slots.remove(key) {
                self.registry.remove_tab(&tab_id);
                self.panes.forget(&tab_id);
                self.hidden_headings.remove(&tab_id);
            }
        }

        let mut added = 0;
        for (index, slot) in desired.into_iter().enumerate() {
            match self.slots.get(&slot.key) {
                Some(existing) => {
                    let tab_id = existing.clone();
                    if self.registry.position(&tab_id) != Some(index) {
                        self.registry.move_tab(&tab_id, index);
                    }
                    self.registry.set_heading(&tab_id, slot.heading);
                    self.panes.set_body(&tab_id, slot.content);
                }
                None => {
                    let mut tab = Tab::new(slot.heading).disabled(slot.disabled);
                    if let Some(handler) = self.handlers.get(&slot.key.entry) {
                        let handler = Arc::clone(handler);
                        tab = tab.on_select(move |id| handler(id));
                    }

                    let tab_id = self.registry.add_tab(tab, Some(index))?;
                    self.panes.set_body(&tab_id, slot.content);
                    self.slots.insert(slot.key, tab_id);
                    added += 1;
                }
            }
        }

        if added > 0 || !vanished.is_empty() {
            tracing::debug!(added, removed = vanished.len(), "Reconciled tabs");
        }

        self.apply_bindings();
        self.sync();
        Ok(())
    }

    fn desired_slots(&self) -> Vec<DesiredSlot> {
        let mut desired = Vec::new();

        for (entry, template_entry) in self.template.entries.iter().enumerate() {
            match template_entry {
                TemplateEntry::Static {
                    heading,
                    content,
                    disabled,
                } => desired.push(DesiredSlot {
                    key: SlotKey { entry, item: None },
                    heading: heading.clone(),
                    content: content.clone(),
                    disabled: *disabled,
                }),
                TemplateEntry::Repeat {
                    collection,
                    heading,
                    content,
                    filter_available,
                    heading_markup,
                } => {
                    let items = self.collections.get(collection).map(Vec::as_slice);
                    let visible = items
                        .unwrap_or_default()
                        .iter()
                        .filter(|item| !*filter_available || item.available);

                    for (index, item) in visible.enumerate() {
                        let title = interpolate(heading, item, index);
                        desired.push(DesiredSlot {
                            key: SlotKey {
                                entry,
                                item: Some(item.key.clone()),
                            },
                            heading: if *heading_markup {
                                Heading::Markup(title)
                            } else {
                                Heading::Text(title)
                            },
                            content: interpolate(content, item, index),
                            disabled: false,
                        });
                    }
                }
            }
        }

        desired
    }

    /// Apply item `active` flags changed by the caller since the last
    /// write-back
    fn apply_bindings(&mut self) {
        let by_tab: HashMap<&str, &SlotKey> = self
            .slots
            .iter()
            .map(|(key, tab_id)| (tab_id.as_str(), key))
            .collect();

        let mut deactivate = Vec::new();
        let mut activate = None;

        // Registry order: the first tab of the first assigned item wins
        for tab in self.registry.iter() {
            let Some((bound, item)) = by_tab.get(tab.id()).and_then(|key| self.bound_item(key))
            else {
                continue;
            };
            let Some(wanted) = item.active else {
                continue;
            };

            let changed = match self.written.get(&bound) {
                Some(written) => *written != wanted,
                // Never written back: only an explicit `true` counts
                None => wanted,
            };
            if !changed {
                continue;
            }

            if wanted {
                activate.get_or_insert_with(|| tab.id().to_string());
            } else {
                deactivate.push(tab.id().to_string());
            }
        }

        for tab_id in deactivate {
            self.registry.assign_active(&tab_id, false);
        }
        if let Some(tab_id) = activate {
            self.registry.assign_active(&tab_id, true);
        }
    }

    /// Write registry state back into collections and remount the pane
    fn sync(&mut self) {
        let mut item_active: HashMap<ItemKey, bool> = HashMap::new();

        for (key, tab_id) in &self.slots {
            let Some(item_key) = key.item.as_ref() else {
                continue;
            };
            if let Some(TemplateEntry::Repeat { collection, .. }) =
                self.template.entries.get(key.entry)
            {
                let active = self.registry.get(tab_id).is_some_and(Tab::is_active);
                *item_active
                    .entry((collection.clone(), item_key.clone()))
                    .or_default() |= active;
            }
        }

        // Items without a tab (filtered out) are written back inactive
        let bound = self.template.collections();
        self.written.clear();
        for (name, items) in self.collections.iter_mut() {
            if !bound.contains(&name.as_str()) {
                continue;
            }
            for item in items.iter_mut() {
                let key = (name.clone(), item.key.clone());
                let active = item_active.get(&key).copied().unwrap_or(false);
                item.active = Some(active);
                self.written.insert(key, active);
            }
        }

        let active = self.registry.active_tab().map(|t| t.id().to_string());
        self.panes.sync(active.as_deref());
    }

    fn bound_item(&self, key: &SlotKey) -> Option<(ItemKey, &RepeatItem)> {
        let item_key = key.item.as_deref()?;
        match self.template.entries.get(key.entry) {
            Some(TemplateEntry::Repeat { collection, .. }) => {
                let item = self
                    .collections
                    .get(collection)?
                    .iter()
                    .find(|item| item.key == item_key)?;
                Some(((collection.clone(), item.key.clone()), item))
            }
            _ => None,
        }
    }
}

fn wrap_handler(handler: &SelectHandler) -> tabset_tabs::SelectCallback {
    let handler = Arc::clone(handler);
    Box::new(move |id: &str| handler(id))
}

//! Tab data structure
//!
//! A tab carries:
//! - Heading (plain text or markup, opaque to the registry)
//! - Active / disabled flags
//! - An optional select callback

use chrono::{DateTime, Utc};
use scraper::Html;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::state::TabState;

/// Invoked with the tab id on every transition into the active state
pub type SelectCallback = Box<dyn FnMut(&str) + Send>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Heading {
    /// Plain text heading
    Text(String),
    /// Rich heading content, kept verbatim for the renderer
    Markup(String),
}

impl Heading {
    pub fn text(value: impl Into<String>) -> Self {
        Heading::Text(value.into())
    }

    pub fn markup(value: impl Into<String>) -> Self {
        Heading::Markup(value.into())
    }

    /// Heading with markup tags stripped
    pub fn plain_text(&self) -> String {
        match self {
            Heading::Text(text) => text.clone(),
            Heading::Markup(markup) => Html::parse_fragment(markup)
                .root_element()
                .text()
                .collect(),
        }
    }

    pub fn markup_source(&self) -> Option<&str> {
        match self {
            Heading::Text(_) => None,
            Heading::Markup(markup) => Some(markup),
        }
    }
}

pub struct Tab {
    id: String,
    heading: Heading,
    active: bool,
    disabled: bool,
    /// Last transition into the active state
    last_selected_at: Option<DateTime<Utc>>,
    on_select: Option<SelectCallback>,
}

impl Tab {
    pub fn new(heading: Heading) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), heading)
    }

    /// Create a tab with a caller-chosen identity
    pub fn with_id(id: impl Into<String>, heading: Heading) -> Self {
        Self {
            id: id.into(),
            heading,
            active: false,
            disabled: false,
            last_selected_at: None,
            on_select: None,
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_select<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&str) + Send + 'static,
    {
        self.on_select = Some(Box::new(callback));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn heading(&self) -> &Heading {
        &self.heading
    }

    pub fn title(&self) -> String {
        self.heading.plain_text()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn last_selected_at(&self) -> Option<DateTime<Utc>> {
        self.last_selected_at
    }

    pub fn state(&self) -> TabState {
        TabState::from_flags(self.active, self.disabled)
    }

    pub fn info(&self) -> TabInfo {
        TabInfo {
            id: self.id.clone(),
            title: self.title(),
            markup: self.heading.markup_source().map(str::to_string),
            state: self.state(),
            disabled: self.disabled,
        }
    }

    /// Enter the active state, optionally firing the select callback
    pub(crate) fn activate(&mut self, notify: bool) {
        self.active = true;
        self.last_selected_at = Some(Utc::now());

        tracing::debug!(tab_id = %self.id, notify, "Tab activated");

        if notify {
            if let Some(callback) = self.on_select.as_mut() {
                callback(&self.id);
            }
        }
    }

    pub(crate) fn deactivate(&mut self) {
        if self.active {
            tracing::debug!(tab_id = %self.id, "Tab deactivated");
        }
        self.active = false;
    }

    pub(crate) fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub(crate) fn set_heading(&mut self, heading: Heading) {
        self.heading = heading;
    }

    pub(crate) fn set_on_select(&mut self, callback: SelectCallback) {
        self.on_select = Some(callback);
    }
}

impl std::fmt::Debug for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tab")
            .field("id", &self.id)
            .field("heading", &self.heading)
            .field("active", &self.active)
            .field("disabled", &self.disabled)
            .field("last_selected_at", &self.last_selected_at)
            .field("on_select", &self.on_select.is_some())
            .finish()
    }
}

/// Serializable snapshot of a tab for renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabInfo {
    pub id: String,
    pub title: String,
    pub markup: Option<String>,
    pub state: TabState,
    pub disabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_new_tab() {
        let tab = Tab::new(Heading::text("First Tab 1"));
        assert!(!tab.is_active());
        assert!(!tab.is_disabled());
        assert_eq!(tab.state(), TabState::Inactive);
        assert_eq!(tab.title(), "First Tab 1");
        assert!(tab.last_selected_at().is_none());
        assert!(!tab.id().is_empty());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Tab::new(Heading::text("a"));
        let b = Tab::new(Heading::text("a"));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_markup_heading() {
        let heading = Heading::markup("<b>Second</b> Tab 2");
        assert_eq!(heading.plain_text(), "Second Tab 2");
        assert_eq!(heading.markup_source(), Some("<b>Second</b> Tab 2"));
        assert_eq!(Heading::text("x").markup_source(), None);
    }

    #[test]
    fn test_markup_heading_decodes_entities() {
        let heading = Heading::markup("<b>Q&amp;A</b> 1 &lt; 2");
        assert_eq!(heading.plain_text(), "Q&A 1 < 2");

        let heading = Heading::markup(r#"<span title="a > b">Tab</span> one"#);
        assert_eq!(heading.plain_text(), "Tab one");

        // Plain text is never parsed
        assert_eq!(Heading::text("a &amp; b").plain_text(), "a &amp; b");
    }

    #[test]
    fn test_activate_fires_callback_only_when_notified() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut tab = Tab::with_id("one", Heading::text("one")).on_select(move |id| {
            assert_eq!(id, "one");
            counter.fetch_add(1, Ordering::SeqCst);
        });

        tab.activate(false);
        assert!(tab.is_active());
        assert!(tab.last_selected_at().is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        tab.deactivate();
        tab.activate(true);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_info_snapshot() {
        let mut tab = Tab::with_id("t1", Heading::markup("<i>hi</i>")).disabled(true);
        let info = tab.info();
        assert_eq!(info.state, TabState::Disabled);
        assert_eq!(info.title, "hi");
        assert_eq!(info.markup.as_deref(), Some("<i>hi</i>"));

        tab.activate(false);
        let json = serde_json::to_value(tab.info()).unwrap();
        assert_eq!(json["state"], "active");
        assert_eq!(json["id"], "t1");
    }
}

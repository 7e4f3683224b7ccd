//! Declarative tabset template
//!
//! A template lists the widget's tabs in document order. Static entries
//! map to exactly one tab. Repeat entries expand to one tab per item of a
//! named collection, optionally filtered by availability.

use serde::{Deserialize, Serialize};

use tabset_tabs::Heading;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TemplateEntry {
    Static {
        heading: Heading,
        #[serde(default)]
        content: String,
        #[serde(default)]
        disabled: bool,
    },
    Repeat {
        /// Collection the entry is bound to
        collection: String,
        /// Heading format, supports `{title}`, `{key}` and `{index}`
        heading: String,
        #[serde(default)]
        content: String,
        /// Skip items whose `available` flag is false
        #[serde(default = "default_true")]
        filter_available: bool,
        /// Render the interpolated heading as markup
        #[serde(default)]
        heading_markup: bool,
    },
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabsetTemplate {
    pub entries: Vec<TemplateEntry>,
}

impl TabsetTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let template: Self = serde_json::from_str(json)?;
        template.validate()?;
        Ok(template)
    }

    pub fn with_static(mut self, heading: Heading, content: impl Into<String>) -> Self {
        self.entries.push(TemplateEntry::Static {
            heading,
            content: content.into(),
            disabled: false,
        });
        self
    }

    pub fn with_disabled_static(mut self, heading: Heading, content: impl Into<String>) -> Self {
        self.entries.push(TemplateEntry::Static {
            heading,
            content: content.into(),
            disabled: true,
        });
        self
    }

    pub fn with_repeat(
        mut self,
        collection: impl Into<String>,
        heading: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.entries.push(TemplateEntry::Repeat {
            collection: collection.into(),
            heading: heading.into(),
            content: content.into(),
            filter_available: true,
            heading_markup: false,
        });
        self
    }

    pub fn validate(&self) -> Result<()> {
        for (index, entry) in self.entries.iter().enumerate() {
            if let TemplateEntry::Repeat { collection, .. } = entry {
                if collection.trim().is_empty() {
                    return Err(CoreError::Config(format!(
                        "repeat entry {} has no collection",
                        index
                    )));
                }
            }
        }
        Ok(())
    }

    /// Names of all collections referenced by repeat entries
    pub fn collections(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if let TemplateEntry::Repeat { collection, .. } = entry {
                if !names.contains(&collection.as_str()) {
                    names.push(collection);
                }
            }
        }
        names
    }
}

/// One element of a collection bound to repeat entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatItem {
    /// Stable identity of the item within its collection
    pub key: String,
    pub title: String,
    #[serde(default = "default_true")]
    pub available: bool,
    /// Two-way bound active flag
    #[serde(default)]
    pub active: Option<bool>,
}

impl RepeatItem {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            available: true,
            active: None,
        }
    }
}

/// Expand `{title}`, `{key}` and `{index}` placeholders
pub(crate) fn interpolate(format: &str, item: &RepeatItem, index: usize) -> String {
    format
        .replace("{title}", &item.title)
        .replace("{key}", &item.key)
        .replace("{index}", &index.to_string())
}

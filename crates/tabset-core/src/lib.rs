//! Tabset Core
//!
//! Rendering-surface side of a tab widget: it drives one `TabRegistry`
//! from a declarative template and projects registry state back into a
//! header strip and a single mounted content pane.

mod config;
mod error;
mod handle;
mod pane;
mod surface;
mod template;

pub use config::TabsetConfig;
pub use error::CoreError;
pub use handle::SharedTabset;
pub use pane::{Pane, PaneHost};
pub use surface::{HeaderView, PaneView, RenderedTabset, TabsetSurface};
pub use template::{RepeatItem, TabsetTemplate, TemplateEntry};

// Re-export registry types
pub use tabset_tabs::{
    Heading, ReplacementSelect, SelectCallback, Tab, TabError, TabInfo, TabRegistry, TabState,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
///
/// `RUST_LOG` takes precedence over `default_filter`.
pub fn init_logging(default_filter: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt().with_env_filter(filter).with_target(true).init();
}

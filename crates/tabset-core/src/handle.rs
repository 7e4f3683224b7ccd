//! Shared widget handle
//!
//! One handle per tab widget instance, cloned into whatever needs to drive
//! or read it. There is no process-wide registry of widgets.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::surface::{RenderedTabset, TabsetSurface};

/// Thread-safe wrapper around one `TabsetSurface`
#[derive(Clone)]
pub struct SharedTabset {
    surface: Arc<Mutex<TabsetSurface>>,
}

impl SharedTabset {
    pub fn new(surface: TabsetSurface) -> Self {
        Self {
            surface: Arc::new(Mutex::new(surface)),
        }
    }

    /// Run `f` with exclusive access to the surface.
    ///
    /// Select callbacks run while the lock is held and must not call back
    /// into the same handle.
    pub fn with<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut TabsetSurface) -> T,
    {
        let mut guard = self.surface.lock();
        f(&mut guard)
    }

    pub fn click(&self, position: usize) -> bool {
        self.with(|surface| surface.click(position))
    }

    pub fn render(&self) -> RenderedTabset {
        self.with(|surface| surface.render())
    }

    /// True if both handles drive the same widget instance
    pub fn same_widget(&self, other: &SharedTabset) -> bool {
        Arc::ptr_eq(&self.surface, &other.surface)
    }
}

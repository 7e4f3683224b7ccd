//! Tabset Tab Registry
//!
//! An ordered collection of tabs where at most one tab is active at a time.
//! The registry never creates tabs on its own; a rendering surface adds and
//! removes them as its declarative structure changes and forwards clicks.

mod error;
mod registry;
mod state;
mod tab;

pub use error::TabError;
pub use registry::{ReplacementSelect, TabRegistry};
pub use state::TabState;
pub use tab::{Heading, SelectCallback, Tab, TabInfo};

pub type Result<T> = std::result::Result<T, TabError>;

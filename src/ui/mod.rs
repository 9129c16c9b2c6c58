//! UI components for Livemark
//!
//! This module contains the toolbar and the toast area.

mod toasts;
mod toolbar;

pub use toasts::Toasts;
pub use toolbar::{Toolbar, ToolbarAction};

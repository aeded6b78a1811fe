//! User Interface layer for datascout
//!
//! - Theme definitions and colors (shared by all modules)
//! - Reusable widgets
//! - Main render with module routing, sidebar and status bar

pub mod render;
pub mod theme;
pub mod widgets;

pub use render::render;
pub use render::ModuleTab;
pub use theme::Theme;

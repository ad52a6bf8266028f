//! UI layer for the desktop window: app shell and notice palette.

pub mod app;
pub mod theme;

pub use app::TinyLinkApp;

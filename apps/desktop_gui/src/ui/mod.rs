//! UI layer for desktop GUI: search bar, filter popover, results and pager.

pub mod app;

pub use app::DesktopGuiApp;

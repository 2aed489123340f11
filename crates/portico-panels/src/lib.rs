//! Headless view-models for Portico client surfaces.
//!
//! Each panel turns portal API data into render-ready view data and owns
//! the state machine behind it; drawing is left to whatever UI shell
//! embeds these (desktop, web, TUI). Renderers call `snapshot()` after
//! every change signal and draw exactly what the snapshot says.

pub mod avatar;
pub mod notifications;
pub mod sidebar;
pub mod timefmt;
pub mod toast;

pub use avatar::AvatarView;
pub use notifications::{NotificationsPanel, PanelSnapshot, PanelView, Tab, TabBody};
pub use sidebar::SidebarView;
pub use toast::{Toast, ToastLevel, ToastQueue};

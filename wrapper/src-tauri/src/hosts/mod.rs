//! Tauri-backed implementations of the `buzz_core` host traits.

pub mod auth;
pub mod screen;
pub mod surface;
pub mod webview;
pub mod window;

use buzz_core::HostError;

pub use auth::SupabaseAuth;
pub use screen::DesktopScreen;
pub use surface::{EventSurface, ViewCache};
pub use webview::AiWebview;
pub use window::TauriWindow;

/// Label of the transparent overlay window declared in `tauri.conf.json`.
pub const MAIN_WINDOW: &str = "main";

/// Label of the window hosting the AI chat page.
pub const AI_VIEW_WINDOW: &str = "ai-view";

pub(crate) fn host_err(err: tauri::Error) -> HostError {
    HostError::Other(err.to_string())
}

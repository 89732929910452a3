//! Interfaces the interaction layer consumes from its host environment.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::display::DisplayDescriptor;
use crate::effect::Notice;
use crate::error::HostResult;
use crate::geometry::{Delta, Size};
use crate::overlay::OverlayView;

/// Placement and attributes of the overlay window.
pub trait WindowHost: Send {
    fn move_window_by(&mut self, delta: Delta) -> HostResult<()>;
    fn resize_window_to(&mut self, size: Size) -> HostResult<()>;
    fn set_click_through(&mut self, enabled: bool) -> HostResult<()>;
    fn reset_to_full_extent(&mut self) -> HostResult<()>;
    fn toggle_visibility(&mut self) -> HostResult<()>;
    /// Fire-and-forget; the indicator dismisses itself.
    fn show_display_indicator(&mut self, index: usize) -> HostResult<()>;
    /// Ask the host to report the current [`StealthStatus`] back as an event.
    fn refresh_stealth_status(&mut self) -> HostResult<()>;
    fn quit(&mut self) -> HostResult<()>;
}

/// The embedded browser surface hosting the AI chat page.
pub trait WebviewHost: Send {
    fn load_url(&mut self, url: &str) -> HostResult<()>;
    fn show(&mut self) -> HostResult<()>;
    fn hide(&mut self) -> HostResult<()>;
    fn reload(&mut self) -> HostResult<()>;
    fn go_back(&mut self) -> HostResult<()>;
    fn go_forward(&mut self) -> HostResult<()>;
    fn focus(&mut self) -> HostResult<()>;
    fn eval(&mut self, script: &str) -> HostResult<()>;
}

/// The rendered overlay UI.
pub trait Surface: Send {
    fn render(&mut self, view: &OverlayView);
    fn notify(&mut self, notice: &Notice);
}

/// Screen capture, monitor enumeration and the clipboard.
#[async_trait]
pub trait ScreenHost: Send + Sync {
    async fn capture_screen(&self) -> HostResult<Screenshot>;
    async fn list_displays(&self) -> HostResult<Vec<DisplayDescriptor>>;
    async fn write_clipboard_image(&self, shot: &Screenshot) -> HostResult<()>;
}

/// A captured screen as raw RGBA8 pixels.
#[derive(Clone, PartialEq, Eq)]
pub struct Screenshot {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Screenshot {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        Self {
            width,
            height,
            rgba,
        }
    }
}

impl fmt::Debug for Screenshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Screenshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

/// Whether the overlay is excluded from screen capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StealthStatus {
    pub success: bool,
    pub platform: String,
    pub version: String,
}

impl StealthStatus {
    pub fn label(&self) -> &'static str {
        if self.success {
            "Active"
        } else {
            "Disabled"
        }
    }
}

use std::sync::{Arc, Mutex};
use tauri::{AppHandle, Manager};
use tracing::{debug, warn};

use buzz_core::host::Surface;
use buzz_core::{Notice, OverlayView};

use super::MAIN_WINDOW;

pub const VIEW_EVENT: &str = "overlay://view";
pub const NOTICE_EVENT: &str = "overlay://notice";

/// Last rendered view, for a UI that (re)loads after the first render.
#[derive(Clone, Default)]
pub struct ViewCache {
    inner: Arc<Mutex<Option<OverlayView>>>,
}

impl ViewCache {
    pub fn latest(&self) -> Option<OverlayView> {
        self.inner.lock().ok().and_then(|view| view.clone())
    }

    fn store(&self, view: &OverlayView) {
        if let Ok(mut slot) = self.inner.lock() {
            *slot = Some(view.clone());
        }
    }
}

/// Pushes views and notices to the overlay page as Tauri events.
pub struct EventSurface {
    app: AppHandle,
    cache: ViewCache,
}

impl EventSurface {
    pub fn new(app: AppHandle, cache: ViewCache) -> Self {
        Self { app, cache }
    }
}

impl Surface for EventSurface {
    fn render(&mut self, view: &OverlayView) {
        self.cache.store(view);
        if let Err(e) = self.app.emit_to(MAIN_WINDOW, VIEW_EVENT, view) {
            warn!("Failed to emit overlay view: {}", e);
        }
    }

    fn notify(&mut self, notice: &Notice) {
        debug!("Notice: {:?}", notice);
        if let Err(e) = self.app.emit_to(MAIN_WINDOW, NOTICE_EVENT, notice) {
            warn!("Failed to emit notice: {}", e);
        }
    }
}

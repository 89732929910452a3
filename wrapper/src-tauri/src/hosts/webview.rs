use tauri::{AppHandle, LogicalPosition, Manager, Window, WindowBuilder, WindowUrl};
use tracing::{debug, info};

use buzz_core::host::WebviewHost;
use buzz_core::{HostError, HostResult};

use super::{host_err, AI_VIEW_WINDOW, MAIN_WINDOW};

/// Offset of the AI view from the overlay's top-left corner, below the toolbar.
pub const AI_VIEW_OFFSET: (f64, f64) = (20.0, 80.0);
pub const AI_VIEW_SIZE: (f64, f64) = (900.0, 640.0);

/// Hosts the AI chat page in a borderless window that tracks the overlay.
pub struct AiWebview {
    app: AppHandle,
}

impl AiWebview {
    pub fn new(app: AppHandle) -> Self {
        Self { app }
    }

    fn window(&self) -> HostResult<Window> {
        self.app
            .get_window(AI_VIEW_WINDOW)
            .ok_or(HostError::Unavailable("ai view"))
    }

    fn create(&self, url: &str) -> HostResult<Window> {
        let external = url::Url::parse(url)
            .map_err(|e| HostError::InvalidInput(format!("{}: {}", url, e)))?;

        let mut builder = WindowBuilder::new(&self.app, AI_VIEW_WINDOW, WindowUrl::External(external))
            .title("Buzz AI")
            .inner_size(AI_VIEW_SIZE.0, AI_VIEW_SIZE.1)
            .decorations(false)
            .always_on_top(true)
            .skip_taskbar(true)
            .visible(false);

        if let Some(origin) = self.overlay_origin() {
            builder = builder.position(origin.x + AI_VIEW_OFFSET.0, origin.y + AI_VIEW_OFFSET.1);
        }

        info!("Creating AI view window for {}", url);
        builder.build().map_err(host_err)
    }

    fn overlay_origin(&self) -> Option<LogicalPosition<f64>> {
        let main = self.app.get_window(MAIN_WINDOW)?;
        let scale = main.scale_factor().ok()?;
        let position = main.outer_position().ok()?;
        Some(position.to_logical(scale))
    }
}

impl WebviewHost for AiWebview {
    fn load_url(&mut self, url: &str) -> HostResult<()> {
        match self.app.get_window(AI_VIEW_WINDOW) {
            Some(window) => {
                let target = serde_json::to_string(url)?;
                window
                    .eval(&format!("window.location.replace({});", target))
                    .map_err(host_err)
            }
            None => self.create(url).map(|_| ()),
        }
    }

    fn show(&mut self) -> HostResult<()> {
        self.window()?.show().map_err(host_err)
    }

    fn hide(&mut self) -> HostResult<()> {
        self.window()?.hide().map_err(host_err)
    }

    fn reload(&mut self) -> HostResult<()> {
        self.eval("window.location.reload();")
    }

    fn go_back(&mut self) -> HostResult<()> {
        self.eval("window.history.back();")
    }

    fn go_forward(&mut self) -> HostResult<()> {
        self.eval("window.history.forward();")
    }

    fn focus(&mut self) -> HostResult<()> {
        self.window()?.set_focus().map_err(host_err)
    }

    fn eval(&mut self, script: &str) -> HostResult<()> {
        debug!("Evaluating {} byte script in AI view", script.len());
        self.window()?.eval(script).map_err(host_err)
    }
}

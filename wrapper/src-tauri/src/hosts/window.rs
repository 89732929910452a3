use tauri::{AppHandle, Manager, PhysicalPosition, Window, WindowBuilder, WindowUrl};
use tracing::{debug, info, warn};

use buzz_core::config::constants::{INDICATOR_FADE_AFTER, INDICATOR_LIFETIME};
use buzz_core::config::WindowConfig;
use buzz_core::display::IndicatorView;
use buzz_core::geometry::{Delta, Size};
use buzz_core::host::{StealthStatus, WindowHost};
use buzz_core::validation::validate_delta;
use buzz_core::{HostError, HostResult, OverlayHandle, UiEvent};

use super::{host_err, screen, AI_VIEW_WINDOW, MAIN_WINDOW};

/// Window host for the transparent overlay window.
pub struct TauriWindow {
    app: AppHandle,
    config: WindowConfig,
    indicators: u64,
}

impl TauriWindow {
    pub fn new(app: AppHandle, config: WindowConfig) -> Self {
        Self {
            app,
            config,
            indicators: 0,
        }
    }

    fn main_window(&self) -> HostResult<Window> {
        self.app
            .get_window(MAIN_WINDOW)
            .ok_or(HostError::Unavailable("main window"))
    }

    /// Apply the configured window attributes. Returns whether capture
    /// exclusion took effect.
    pub fn apply_config(&self) -> HostResult<bool> {
        let window = self.main_window()?;
        window
            .set_always_on_top(self.config.always_on_top)
            .map_err(host_err)?;

        if !self.config.stealth {
            return Ok(false);
        }
        match window.set_content_protected(true) {
            Ok(()) => Ok(true),
            Err(e) => {
                warn!("Content protection unavailable: {}", e);
                Ok(false)
            }
        }
    }

    fn stealth_status(&self) -> StealthStatus {
        StealthStatus {
            success: self.apply_config().unwrap_or(false),
            platform: std::env::consts::OS.to_string(),
            version: os_version(),
        }
    }
}

fn shift(position: PhysicalPosition<i32>, delta: Delta, scale: f64) -> PhysicalPosition<i32> {
    PhysicalPosition::new(
        position.x + (delta.delta_x as f64 * scale).round() as i32,
        position.y + (delta.delta_y as f64 * scale).round() as i32,
    )
}

fn move_by(window: &Window, delta: Delta) -> HostResult<()> {
    let scale = window.scale_factor().map_err(host_err)?;
    let position = window.outer_position().map_err(host_err)?;
    window
        .set_position(shift(position, delta, scale))
        .map_err(host_err)
}

impl WindowHost for TauriWindow {
    fn move_window_by(&mut self, delta: Delta) -> HostResult<()> {
        let delta = validate_delta(delta)?;
        move_by(&self.main_window()?, delta)?;
        // The AI view rides along with the overlay.
        if let Some(view) = self.app.get_window(AI_VIEW_WINDOW) {
            move_by(&view, delta)?;
        }
        Ok(())
    }

    fn resize_window_to(&mut self, size: Size) -> HostResult<()> {
        self.main_window()?
            .set_size(tauri::LogicalSize::new(size.width, size.height))
            .map_err(host_err)
    }

    fn set_click_through(&mut self, enabled: bool) -> HostResult<()> {
        self.main_window()?
            .set_ignore_cursor_events(enabled)
            .map_err(host_err)
    }

    fn reset_to_full_extent(&mut self) -> HostResult<()> {
        let window = self.main_window()?;
        let monitor = window
            .current_monitor()
            .map_err(host_err)?
            .ok_or(HostError::Unavailable("monitor"))?;

        window
            .set_position(*monitor.position())
            .map_err(host_err)?;
        window.set_size(*monitor.size()).map_err(host_err)
    }

    fn toggle_visibility(&mut self) -> HostResult<()> {
        let window = self.main_window()?;
        if window.is_visible().map_err(host_err)? {
            info!("Hiding overlay");
            window.hide().map_err(host_err)
        } else {
            info!("Showing overlay");
            window.show().map_err(host_err)?;
            window.set_focus().map_err(host_err)
        }
    }

    fn show_display_indicator(&mut self, index: usize) -> HostResult<()> {
        let displays = screen::enumerate_displays()?;
        let display = displays
            .get(index)
            .ok_or_else(|| HostError::InvalidInput(format!("no display at index {}", index)))?;

        let view = serde_json::to_string(&IndicatorView::for_display(display))?;
        let script = format!(
            "window.__BUZZ_INDICATOR__ = {{ display: {}, fadeAfterMs: {} }};",
            view,
            INDICATOR_FADE_AFTER.as_millis()
        );

        // Labels stay unique so a closing indicator never blocks the next one.
        self.indicators += 1;
        let label = format!("display-indicator-{}", self.indicators);
        let bounds = display.bounds;

        let indicator = WindowBuilder::new(&self.app, label, WindowUrl::App("indicator.html".into()))
            .initialization_script(&script)
            .position(bounds.x as f64, bounds.y as f64)
            .inner_size(bounds.width as f64, bounds.height as f64)
            .transparent(true)
            .decorations(false)
            .always_on_top(true)
            .skip_taskbar(true)
            .resizable(false)
            .focused(false)
            .build()
            .map_err(host_err)?;
        indicator.set_ignore_cursor_events(true).map_err(host_err)?;
        debug!("Display indicator shown on display {}", index);

        tauri::async_runtime::spawn(async move {
            tokio::time::sleep(INDICATOR_LIFETIME).await;
            if let Err(e) = indicator.close() {
                debug!("Indicator already gone: {}", e);
            }
        });
        Ok(())
    }

    fn refresh_stealth_status(&mut self) -> HostResult<()> {
        let status = self.stealth_status();
        let handle = self
            .app
            .try_state::<OverlayHandle>()
            .ok_or(HostError::Unavailable("overlay runtime"))?;
        handle
            .send(UiEvent::StealthReported(status))
            .map_err(|e| HostError::Other(e.to_string()))
    }

    fn quit(&mut self) -> HostResult<()> {
        info!("Quit requested");
        self.app.exit(0);
        Ok(())
    }
}

/// Operating system release, best effort.
fn os_version() -> String {
    #[cfg(target_os = "macos")]
    let output = std::process::Command::new("sw_vers")
        .arg("-productVersion")
        .output();
    #[cfg(target_os = "windows")]
    let output = std::process::Command::new("cmd").args(["/C", "ver"]).output();
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let output = std::process::Command::new("uname").arg("-r").output();

    match output {
        Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout).trim().to_string(),
        _ => "unknown".to_string(),
    }
}

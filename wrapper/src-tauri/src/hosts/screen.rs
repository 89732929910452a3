use async_trait::async_trait;
use screenshots::Screen;
use std::borrow::Cow;
use tracing::{debug, info};

use buzz_core::display::DisplayDescriptor;
use buzz_core::geometry::ScreenRect;
use buzz_core::host::{ScreenHost, Screenshot};
use buzz_core::{HostError, HostResult};

/// Monitors in the order the capture backend reports them.
pub fn enumerate_displays() -> HostResult<Vec<DisplayDescriptor>> {
    let screens = Screen::all().map_err(other)?;
    Ok(screens
        .iter()
        .enumerate()
        .map(|(index, screen)| describe(index, screen))
        .collect())
}

fn describe(index: usize, screen: &Screen) -> DisplayDescriptor {
    let info = &screen.display_info;
    DisplayDescriptor {
        id: info.id,
        index,
        label: None,
        bounds: ScreenRect::new(info.x, info.y, info.width, info.height),
        primary: info.is_primary,
    }
}

fn capture_primary() -> HostResult<Screenshot> {
    let screens = Screen::all().map_err(other)?;
    let screen = screens
        .iter()
        .find(|s| s.display_info.is_primary)
        .or_else(|| screens.first())
        .ok_or(HostError::NoSource)?;

    let image = screen.capture().map_err(other)?;
    let shot = to_screenshot(image);
    info!("Captured {}x{} screenshot", shot.width, shot.height);
    Ok(shot)
}

fn to_screenshot(image: image::RgbaImage) -> Screenshot {
    let (width, height) = image.dimensions();
    Screenshot::new(width, height, image.into_raw())
}

fn other(err: impl std::fmt::Display) -> HostError {
    HostError::Other(err.to_string())
}

/// Screen capture through `screenshots`, clipboard through `arboard`.
#[derive(Debug, Default)]
pub struct DesktopScreen;

fn set_clipboard_image(shot: Screenshot) -> HostResult<()> {
    let mut clipboard = arboard::Clipboard::new().map_err(other)?;
    clipboard
        .set_image(arboard::ImageData {
            width: shot.width as usize,
            height: shot.height as usize,
            bytes: Cow::Owned(shot.rgba),
        })
        .map_err(other)
}

#[async_trait]
impl ScreenHost for DesktopScreen {
    async fn capture_screen(&self) -> HostResult<Screenshot> {
        tokio::task::spawn_blocking(capture_primary)
            .await
            .map_err(other)?
    }

    async fn list_displays(&self) -> HostResult<Vec<DisplayDescriptor>> {
        let displays = tokio::task::spawn_blocking(enumerate_displays)
            .await
            .map_err(other)??;
        debug!("Found {} display(s)", displays.len());
        Ok(displays)
    }

    async fn write_clipboard_image(&self, shot: &Screenshot) -> HostResult<()> {
        let shot = shot.clone();
        tokio::task::spawn_blocking(move || set_clipboard_image(shot))
            .await
            .map_err(other)??;
        debug!("Screenshot written to clipboard");
        Ok(())
    }
}

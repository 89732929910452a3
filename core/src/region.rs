use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::effect::Effects;
use crate::geometry::{Rect, Size};

/// Interactive regions of the overlay UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegionId {
    Toolbar,
    DragHandle,
    StartButton,
    SettingsButton,
    SettingsPanel,
    ScreenshotButton,
    QuitButton,
    TutorialButton,
    Webview,
    ServiceSelector,
}

/// Region geometry as last reported by the UI surface.
///
/// Regions that are not currently rendered are simply absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub viewport: Size,
    #[serde(default)]
    pub regions: HashMap<RegionId, Rect>,
}

impl LayoutSnapshot {
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            regions: HashMap::new(),
        }
    }

    pub fn with_region(mut self, id: RegionId, rect: Rect) -> Self {
        self.regions.insert(id, rect);
        self
    }

    pub fn rect_of(&self, id: RegionId) -> Option<Rect> {
        self.regions.get(&id).copied()
    }
}

impl Default for LayoutSnapshot {
    fn default() -> Self {
        Self::new(Size::new(1280, 720))
    }
}

/// The two facts controllers are allowed to share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Facts {
    pub tutorial_active: bool,
    pub session_active: bool,
}

/// Hover and click hooks a controller registers for the regions it cares about.
pub trait RegionListener {
    fn regions(&self) -> &[RegionId];

    fn listens_to(&self, region: RegionId) -> bool {
        self.regions().contains(&region)
    }

    fn on_enter(&mut self, _region: RegionId, _facts: Facts, _fx: &mut Effects) {}

    fn on_leave(&mut self, _region: RegionId, _facts: Facts, _fx: &mut Effects) {}

    fn on_click(&mut self, _region: RegionId, _facts: Facts, _fx: &mut Effects) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_ids_use_kebab_case() {
        let json = serde_json::to_string(&RegionId::SettingsButton).unwrap();
        assert_eq!(json, "\"settings-button\"");
        let parsed: RegionId = serde_json::from_str("\"drag-handle\"").unwrap();
        assert_eq!(parsed, RegionId::DragHandle);
    }

    #[test]
    fn test_layout_lookup() {
        let layout = LayoutSnapshot::new(Size::new(800, 600))
            .with_region(RegionId::Toolbar, Rect::new(0.0, 0.0, 300.0, 48.0));
        assert!(layout.rect_of(RegionId::Toolbar).is_some());
        assert!(layout.rect_of(RegionId::Webview).is_none());
    }

    #[test]
    fn test_layout_deserializes_from_surface_payload() {
        let json = r#"{
            "viewport": {"width": 1024, "height": 768},
            "regions": {"start-button": {"x": 10.0, "y": 5.0, "width": 80.0, "height": 30.0}}
        }"#;
        let layout: LayoutSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(layout.viewport, Size::new(1024, 768));
        assert_eq!(
            layout.rect_of(RegionId::StartButton),
            Some(Rect::new(10.0, 5.0, 80.0, 30.0))
        );
    }
}

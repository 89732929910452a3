use std::collections::HashSet;
use tracing::debug;

use crate::effect::{Effects, WindowCommand};
use crate::region::{Facts, RegionId, RegionListener};

/// Regions that make the overlay interactive while hovered.
pub const DEFAULT_INTERACTIVE_REGIONS: &[RegionId] = &[
    RegionId::Toolbar,
    RegionId::SettingsPanel,
    RegionId::Webview,
    RegionId::ServiceSelector,
];

/// Owns the "pass mouse events through" flag of the overlay window.
///
/// Pointer over any registered region makes the window interactive at once.
/// Leaving the last hovered region hands events back to the windows below,
/// unless the tutorial is running.
#[derive(Debug)]
pub struct ClickThroughController {
    regions: Vec<RegionId>,
    hovered: HashSet<RegionId>,
    enabled: bool,
}

impl Default for ClickThroughController {
    fn default() -> Self {
        let mut controller = Self::new();
        for region in DEFAULT_INTERACTIVE_REGIONS {
            controller.register_region(*region);
        }
        controller
    }
}

impl ClickThroughController {
    /// No regions registered; the window starts interactive.
    pub fn new() -> Self {
        Self {
            regions: Vec::new(),
            hovered: HashSet::new(),
            enabled: false,
        }
    }

    pub fn register_region(&mut self, region: RegionId) {
        if !self.regions.contains(&region) {
            self.regions.push(region);
        }
    }

    /// Last value sent to the window.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_hovered(&self) -> bool {
        !self.hovered.is_empty()
    }

    /// Make the window interactive.
    pub fn disable(&mut self, fx: &mut Effects) {
        self.enabled = false;
        fx.window(WindowCommand::SetClickThrough(false));
    }

    /// Let clicks pass through, unless the tutorial holds the window.
    pub fn enable(&mut self, facts: Facts, fx: &mut Effects) {
        if facts.tutorial_active {
            debug!("Click-through stays off while the tutorial is active");
            return;
        }
        self.enabled = true;
        fx.window(WindowCommand::SetClickThrough(true));
    }

    /// Re-derive the flag from the hover state, e.g. after the tutorial closes.
    pub fn restore(&mut self, facts: Facts, fx: &mut Effects) {
        if self.is_hovered() {
            self.disable(fx);
        } else {
            self.enable(facts, fx);
        }
    }
}

impl RegionListener for ClickThroughController {
    fn regions(&self) -> &[RegionId] {
        &self.regions
    }

    fn on_enter(&mut self, region: RegionId, _facts: Facts, fx: &mut Effects) {
        self.hovered.insert(region);
        self.disable(fx);
    }

    fn on_leave(&mut self, region: RegionId, facts: Facts, fx: &mut Effects) {
        self.hovered.remove(&region);
        if self.hovered.is_empty() {
            self.enable(facts, fx);
        }
    }
}

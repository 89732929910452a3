use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

use crate::config::constants::{PANEL_FADE, PANEL_IDLE_BEFORE_FADE, PANEL_LEAVE_CONFIRM};
use crate::effect::{Effects, Timer, WindowCommand};
use crate::region::{Facts, RegionId, RegionListener};

const TRIGGER_REGIONS: &[RegionId] = &[RegionId::SettingsButton, RegionId::SettingsPanel];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanelPhase {
    Hidden,
    Visible,
    /// Visible, fading out unless hovered again.
    Fading,
}

/// Hover-activated settings panel with a delayed, cancellable close.
///
/// Leaving the button/panel pair is confirmed after a short delay, then the
/// panel idles, fades and hides. Every timer is armed under the current
/// generation; re-entry bumps it so older timers fire into nothing.
#[derive(Debug)]
pub struct HoverPanelController {
    phase: PanelPhase,
    hovered: HashSet<RegionId>,
    generation: u64,
}

impl Default for HoverPanelController {
    fn default() -> Self {
        Self::new()
    }
}

impl HoverPanelController {
    pub fn new() -> Self {
        Self {
            phase: PanelPhase::Hidden,
            hovered: HashSet::new(),
            generation: 0,
        }
    }

    pub fn phase(&self) -> PanelPhase {
        self.phase
    }

    pub fn is_visible(&self) -> bool {
        self.phase != PanelPhase::Hidden
    }

    pub fn is_fading(&self) -> bool {
        self.phase == PanelPhase::Fading
    }

    fn is_hovered(&self) -> bool {
        !self.hovered.is_empty()
    }

    fn cancel_timers(&mut self) {
        self.generation += 1;
        if self.phase == PanelPhase::Fading {
            self.phase = PanelPhase::Visible;
        }
    }

    /// Idempotent. Refreshes the stealth status shown inside the panel.
    pub fn show(&mut self, fx: &mut Effects) {
        self.cancel_timers();
        if self.phase == PanelPhase::Hidden {
            fx.window(WindowCommand::RefreshStealthStatus);
        }
        self.phase = PanelPhase::Visible;
    }

    /// Hide immediately, bypassing the timers.
    pub fn hide(&mut self) {
        self.generation += 1;
        self.phase = PanelPhase::Hidden;
    }

    pub fn on_timer(&mut self, timer: Timer, fx: &mut Effects) {
        match timer {
            Timer::PanelLeaveCheck { generation } if generation == self.generation => {
                if self.is_visible() && !self.is_hovered() {
                    self.start_hide_sequence(fx);
                }
            }
            Timer::PanelIdle { generation } if generation == self.generation => {
                if !self.is_hovered() {
                    self.phase = PanelPhase::Fading;
                    fx.schedule(PANEL_FADE, Timer::PanelFade { generation });
                }
            }
            Timer::PanelFade { generation } if generation == self.generation => {
                if self.is_hovered() {
                    self.phase = PanelPhase::Visible;
                } else {
                    debug!("Settings panel hidden after fade");
                    self.phase = PanelPhase::Hidden;
                }
            }
            _ => {}
        }
    }

    fn start_hide_sequence(&mut self, fx: &mut Effects) {
        self.cancel_timers();
        fx.schedule(
            PANEL_IDLE_BEFORE_FADE,
            Timer::PanelIdle {
                generation: self.generation,
            },
        );
    }
}

impl RegionListener for HoverPanelController {
    fn regions(&self) -> &[RegionId] {
        TRIGGER_REGIONS
    }

    fn on_enter(&mut self, region: RegionId, _facts: Facts, fx: &mut Effects) {
        self.hovered.insert(region);
        self.show(fx);
    }

    fn on_leave(&mut self, region: RegionId, _facts: Facts, fx: &mut Effects) {
        self.hovered.remove(&region);
        fx.schedule(
            PANEL_LEAVE_CONFIRM,
            Timer::PanelLeaveCheck {
                generation: self.generation,
            },
        );
    }
}

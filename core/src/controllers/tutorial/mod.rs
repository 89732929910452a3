mod placement;
mod steps;

pub use placement::{place, CardPlacement, Placement};
pub use steps::{Mascot, MascotPlacement, MascotSize, TutorialStep, DEFAULT_STEPS};

use serde::Serialize;
use tracing::{info, warn};

use crate::effect::{Effects, WindowCommand};
use crate::geometry::Rect;
use crate::region::LayoutSnapshot;

/// Outcome of a next/prev request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Moved,
    Unchanged,
    /// "Next" on the last step closed the tutorial.
    Finished,
}

/// What the surface renders for the current step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepView {
    pub number: usize,
    pub total: usize,
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub spotlight: Option<Rect>,
    pub card: CardPlacement,
    pub prev_enabled: bool,
    pub next_label: &'static str,
    pub is_last: bool,
    pub mascot: Mascot,
}

/// Linear walkthrough with a spotlight on the region each step talks about.
#[derive(Debug)]
pub struct TutorialController {
    steps: &'static [TutorialStep],
    index: usize,
    active: bool,
    placement: Placement,
}

impl Default for TutorialController {
    fn default() -> Self {
        Self::with_steps(DEFAULT_STEPS)
    }
}

impl TutorialController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Panics on an empty step list.
    pub fn with_steps(steps: &'static [TutorialStep]) -> Self {
        assert!(!steps.is_empty(), "tutorial needs at least one step");
        Self {
            steps,
            index: 0,
            active: false,
            placement: Placement::CENTERED,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    fn is_last(&self) -> bool {
        self.index + 1 == self.steps.len()
    }

    pub fn current_step(&self) -> &'static TutorialStep {
        &self.steps[self.index]
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Open at the first step. The caller turns click-through off.
    pub fn show(&mut self, layout: &LayoutSnapshot, fx: &mut Effects) {
        info!("Showing tutorial");
        fx.window(WindowCommand::ResetToFullExtent);
        self.active = true;
        self.index = 0;
        self.render(layout);
    }

    pub fn next(&mut self, layout: &LayoutSnapshot) -> Navigation {
        if !self.active {
            return Navigation::Unchanged;
        }
        if self.is_last() {
            self.hide();
            return Navigation::Finished;
        }
        self.index += 1;
        self.render(layout);
        Navigation::Moved
    }

    pub fn prev(&mut self, layout: &LayoutSnapshot) -> Navigation {
        if !self.active || self.index == 0 {
            return Navigation::Unchanged;
        }
        self.index -= 1;
        self.render(layout);
        Navigation::Moved
    }

    /// Returns whether the tutorial was open.
    pub fn hide(&mut self) -> bool {
        if !self.active {
            return false;
        }
        info!("Tutorial closed at step {}/{}", self.index + 1, self.steps.len());
        self.active = false;
        self.placement = Placement::CENTERED;
        true
    }

    /// Recompute spotlight and card for the current step.
    pub fn render(&mut self, layout: &LayoutSnapshot) {
        if !self.active {
            return;
        }
        let step = self.current_step();
        let target = step.spotlight.and_then(|id| {
            let rect = layout.rect_of(id);
            if rect.is_none() {
                warn!("Tutorial target region not found: {:?}", id);
            }
            rect
        });
        self.placement = place(target, layout.viewport);
    }

    pub fn view(&self) -> Option<StepView> {
        if !self.active {
            return None;
        }
        let step = self.current_step();
        Some(StepView {
            number: self.index + 1,
            total: self.steps.len(),
            icon: step.icon,
            title: step.title,
            description: step.description,
            spotlight: self.placement.spotlight,
            card: self.placement.card,
            prev_enabled: self.index > 0,
            next_label: if self.is_last() { "Finish ✓" } else { "Next →" },
            is_last: self.is_last(),
            mascot: step.mascot,
        })
    }
}

use tracing::debug;

use crate::config::constants::FRAME_INTERVAL;
use crate::effect::{Effects, Timer, WindowCommand};
use crate::geometry::Point;
use crate::region::Facts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragState {
    Idle,
    Dragging { anchor: Point, latest: Point },
}

/// Turns pointer movement on the drag handle into window deltas, at most one
/// per animation frame.
#[derive(Debug)]
pub struct DragController {
    state: DragState,
    frame_pending: bool,
    generation: u64,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

impl DragController {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
            frame_pending: false,
            generation: 0,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Pointer down on the handle. Refused while the tutorial is active.
    pub fn begin(&mut self, screen: Point, facts: Facts) -> bool {
        if facts.tutorial_active {
            debug!("Drag refused while the tutorial is active");
            return false;
        }
        self.state = DragState::Dragging {
            anchor: screen,
            latest: screen,
        };
        true
    }

    pub fn pointer_move(&mut self, screen: Point, fx: &mut Effects) {
        let DragState::Dragging { latest, .. } = &mut self.state else {
            return;
        };
        *latest = screen;

        if !self.frame_pending {
            self.frame_pending = true;
            fx.schedule(
                FRAME_INTERVAL,
                Timer::AnimationFrame {
                    generation: self.generation,
                },
            );
        }
    }

    /// Emit the net displacement since the previous frame.
    pub fn on_frame(&mut self, generation: u64, fx: &mut Effects) {
        if generation != self.generation || !self.frame_pending {
            return;
        }
        self.frame_pending = false;

        if let DragState::Dragging { anchor, latest } = &mut self.state {
            let delta = *latest - *anchor;
            *anchor = *latest;
            if !delta.is_zero() {
                fx.window(WindowCommand::MoveBy(delta));
            }
        }
    }

    /// Pointer up anywhere. Cancels a frame that has not run yet.
    pub fn end(&mut self) {
        if self.is_dragging() {
            self.state = DragState::Idle;
            self.frame_pending = false;
            self.generation += 1;
        }
    }
}

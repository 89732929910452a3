use serde::Serialize;

use crate::config::constants::{CARD_GAP, CARD_MARGIN, CARD_WIDTH, SPOTLIGHT_PADDING};
use crate::geometry::{Rect, Size};

/// Where the step card goes. `left` is the horizontal centre of the card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum CardPlacement {
    Centered,
    Below { top: f64, left: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub spotlight: Option<Rect>,
    pub card: CardPlacement,
}

impl Placement {
    pub const CENTERED: Placement = Placement {
        spotlight: None,
        card: CardPlacement::Centered,
    };
}

/// Spotlight around `target` and the card anchored below it.
pub fn place(target: Option<Rect>, viewport: Size) -> Placement {
    let Some(rect) = target else {
        return Placement::CENTERED;
    };

    let half = CARD_WIDTH / 2.0;
    let min_left = half + CARD_MARGIN;
    let max_left = viewport.width as f64 - half - CARD_MARGIN;
    // Narrow viewports clamp to the minimum.
    let left = min_left.max(max_left.min(rect.center_x()));

    Placement {
        spotlight: Some(rect.inflate(SPOTLIGHT_PADDING)),
        card: CardPlacement::Below {
            top: rect.bottom() + CARD_GAP,
            left,
        },
    }
}

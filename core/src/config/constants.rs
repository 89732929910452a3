use std::time::Duration;

/// Delay before a pointer leave on the settings button/panel is trusted
///
/// Absorbs the leave/enter pair fired while the pointer crosses the gap
/// between the button and the panel.
pub const PANEL_LEAVE_CONFIRM: Duration = Duration::from_millis(100);

/// Idle time with no hover before the settings panel starts fading
pub const PANEL_IDLE_BEFORE_FADE: Duration = Duration::from_millis(1000);

/// Length of the settings panel fade-out animation
pub const PANEL_FADE: Duration = Duration::from_millis(400);

/// Interval between drag animation frames
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Delay before the tutorial opens on a fresh install
pub const TUTORIAL_AUTO_SHOW_DELAY: Duration = Duration::from_millis(1000);

/// Delay between focusing the AI view and pasting a captured screenshot
pub const SCREENSHOT_PASTE_DELAY: Duration = Duration::from_millis(300);

/// Time the display indicator stays fully opaque
pub const INDICATOR_FADE_AFTER: Duration = Duration::from_millis(1300);

/// Lifetime of the display indicator window (opaque + 350ms fade + buffer)
pub const INDICATOR_LIFETIME: Duration = Duration::from_millis(1750);

/// Padding drawn around a spotlighted region
pub const SPOTLIGHT_PADDING: f64 = 10.0;

/// Vertical gap between a spotlighted region and the tutorial card
pub const CARD_GAP: f64 = 20.0;

/// Rendered width of the tutorial card
pub const CARD_WIDTH: f64 = 380.0;

/// Minimum distance between the tutorial card and the viewport edge
pub const CARD_MARGIN: f64 = 20.0;

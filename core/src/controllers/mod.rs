pub mod click_through;
pub mod drag;
pub mod hover_panel;
pub mod service_selector;
pub mod session;
pub mod tutorial;

pub use click_through::ClickThroughController;
pub use drag::DragController;
pub use hover_panel::{HoverPanelController, PanelPhase};
pub use service_selector::ServiceSelector;
pub use session::{SessionController, SessionState};
pub use tutorial::{CardPlacement, Navigation, StepView, TutorialController};

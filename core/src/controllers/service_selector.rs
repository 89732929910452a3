use tracing::debug;

use crate::service::AiService;

/// Modal of mutually exclusive provider choices.
#[derive(Debug, Default)]
pub struct ServiceSelector {
    visible: bool,
}

impl ServiceSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Yields the choice once per show-cycle and closes the modal.
    pub fn select(&mut self, service: AiService) -> Option<AiService> {
        if !self.visible {
            debug!("Ignoring selection of {} while the selector is closed", service);
            return None;
        }
        self.visible = false;
        Some(service)
    }

    /// Close without choosing. Returns whether anything was open.
    pub fn cancel(&mut self) -> bool {
        std::mem::take(&mut self.visible)
    }
}

use serde::Serialize;
use tracing::{debug, info};

use crate::effect::{Effects, WebviewCommand};
use crate::error::SessionError;
use crate::service::AiService;
use crate::webview;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "service", rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Active(AiService),
}

/// Gates the embedded AI view.
#[derive(Debug)]
pub struct SessionController {
    state: SessionState,
    ready: bool,
    status: String,
    pending_prompt: Option<String>,
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionController {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            ready: false,
            status: String::new(),
            pending_prompt: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active(_))
    }

    pub fn service(&self) -> Option<AiService> {
        match self.state {
            SessionState::Active(service) => Some(service),
            SessionState::Idle => None,
        }
    }

    /// Text of the start/stop control.
    pub fn control_label(&self) -> &'static str {
        if self.is_active() {
            "Stop"
        } else {
            "Start"
        }
    }

    /// Status line under the embedded view.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn start(&mut self, service: AiService, fx: &mut Effects) -> Result<(), SessionError> {
        if let SessionState::Active(current) = self.state {
            return Err(SessionError::AlreadyActive(current));
        }

        info!("Starting session with {}", service.display_name());
        self.state = SessionState::Active(service);
        self.ready = false;
        self.status = format!("Loading {}...", service.display_name());
        fx.webview(WebviewCommand::Load(service.url().to_string()));
        fx.webview(WebviewCommand::Show);
        Ok(())
    }

    /// Returns false when there was nothing to stop.
    pub fn stop(&mut self, fx: &mut Effects) -> bool {
        let SessionState::Active(service) = self.state else {
            return false;
        };

        info!("Stopping session with {}", service.display_name());
        self.state = SessionState::Idle;
        self.ready = false;
        self.status.clear();
        self.pending_prompt = None;
        fx.webview(WebviewCommand::Hide);
        true
    }

    /// The hosted page finished loading.
    pub fn on_ready(&mut self, fx: &mut Effects) {
        let Some(service) = self.service() else {
            debug!("Webview ready without an active session");
            return;
        };

        self.ready = true;
        self.status = format!("{} - Ready", service.display_name());
        fx.webview(WebviewCommand::Eval(webview::inject_cursor_css_script()));

        if let Some(prompt) = self.pending_prompt.take() {
            fx.webview(WebviewCommand::Eval(webview::send_message_script(
                service, &prompt,
            )));
        }
    }

    /// Queued until the page is ready. Dropped when no session is active.
    pub fn send_prompt(&mut self, prompt: String, fx: &mut Effects) -> bool {
        let Some(service) = self.service() else {
            debug!("Dropping prompt: no active session");
            return false;
        };

        if self.ready {
            fx.webview(WebviewCommand::Eval(webview::send_message_script(
                service, &prompt,
            )));
        } else {
            self.pending_prompt = Some(prompt);
        }
        true
    }
}

use serde::Serialize;
use std::time::Duration;

use crate::event::Task;
use crate::geometry::{Delta, Size};

/// Commands for the window collaborator. All fire-and-forget.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowCommand {
    MoveBy(Delta),
    ResizeTo(Size),
    SetClickThrough(bool),
    ResetToFullExtent,
    ToggleVisibility,
    ShowDisplayIndicator(usize),
    RefreshStealthStatus,
    Quit,
}

/// Commands for the embedded AI view.
#[derive(Debug, Clone, PartialEq)]
pub enum WebviewCommand {
    Load(String),
    Show,
    Hide,
    Reload,
    GoBack,
    GoForward,
    Focus,
    Eval(String),
}

/// Delayed callbacks that re-enter the event queue.
///
/// Cancellable timers carry the generation they were armed under; the owning
/// controller ignores a firing whose generation is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    AnimationFrame { generation: u64 },
    PanelLeaveCheck { generation: u64 },
    PanelIdle { generation: u64 },
    PanelFade { generation: u64 },
    TutorialAutoShow,
    ScreenshotPaste,
}

/// Something the user has to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "kebab-case")]
pub enum Notice {
    /// Blocking message box.
    Alert(String),
    /// The voice-input shortcut was pressed.
    VoiceToggle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Window(WindowCommand),
    Webview(WebviewCommand),
    Schedule { after: Duration, timer: Timer },
    Spawn(Task),
    Notify(Notice),
}

/// Effect sink handed to controllers.
#[derive(Debug, Default)]
pub struct Effects {
    items: Vec<Effect>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn window(&mut self, command: WindowCommand) {
        self.items.push(Effect::Window(command));
    }

    pub fn webview(&mut self, command: WebviewCommand) {
        self.items.push(Effect::Webview(command));
    }

    pub fn schedule(&mut self, after: Duration, timer: Timer) {
        self.items.push(Effect::Schedule { after, timer });
    }

    pub fn spawn(&mut self, task: Task) {
        self.items.push(Effect::Spawn(task));
    }

    pub fn notify(&mut self, notice: Notice) {
        self.items.push(Effect::Notify(notice));
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, Effect> {
        self.items.drain(..)
    }

    /// Every window command pushed so far, in order.
    pub fn window_commands(&self) -> Vec<WindowCommand> {
        self.items
            .iter()
            .filter_map(|e| match e {
                Effect::Window(c) => Some(c.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn webview_commands(&self) -> Vec<WebviewCommand> {
        self.items
            .iter()
            .filter_map(|e| match e {
                Effect::Webview(c) => Some(c.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn timers(&self) -> Vec<(Duration, Timer)> {
        self.items
            .iter()
            .filter_map(|e| match e {
                Effect::Schedule { after, timer } => Some((*after, *timer)),
                _ => None,
            })
            .collect()
    }
}

//! Recording fakes for the host traits.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use buzz_core::auth::{AuthBackend, AuthError, AuthUser, OAuthProvider};
use buzz_core::display::DisplayDescriptor;
use buzz_core::geometry::{Delta, ScreenRect, Size};
use buzz_core::host::{Screenshot, ScreenHost, Surface, WebviewHost, WindowHost};
use buzz_core::settings::{Settings, SettingsStore};
use buzz_core::{
    Collaborators, HostError, HostResult, Notice, Outbox, Overlay, OverlayView, Task, Timer,
    UiEvent, WebviewCommand, WindowCommand,
};

#[derive(Default)]
pub struct Recorded {
    pub window: Vec<WindowCommand>,
    pub webview: Vec<WebviewCommand>,
    pub views: Vec<OverlayView>,
    pub notices: Vec<Notice>,
    pub window_unavailable: bool,
}

/// Shared log of everything the overlay asked its hosts to do.
#[derive(Clone, Default)]
pub struct Recorder {
    inner: Arc<Mutex<Recorded>>,
}

impl Recorder {
    pub fn with<R>(&self, f: impl FnOnce(&mut Recorded) -> R) -> R {
        f(&mut self.inner.lock().unwrap())
    }

    pub fn window(&self) -> Vec<WindowCommand> {
        self.with(|r| r.window.clone())
    }

    pub fn webview(&self) -> Vec<WebviewCommand> {
        self.with(|r| r.webview.clone())
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.with(|r| r.notices.clone())
    }

    pub fn last_view(&self) -> Option<OverlayView> {
        self.with(|r| r.views.last().cloned())
    }

    pub fn render_count(&self) -> usize {
        self.with(|r| r.views.len())
    }

    pub fn clear(&self) {
        self.with(|r| {
            r.window.clear();
            r.webview.clear();
            r.notices.clear();
        })
    }

    pub fn set_window_unavailable(&self, unavailable: bool) {
        self.with(|r| r.window_unavailable = unavailable)
    }

    pub fn moves(&self) -> Vec<Delta> {
        self.window()
            .into_iter()
            .filter_map(|c| match c {
                WindowCommand::MoveBy(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    pub fn click_through_calls(&self) -> Vec<bool> {
        self.window()
            .into_iter()
            .filter_map(|c| match c {
                WindowCommand::SetClickThrough(enabled) => Some(enabled),
                _ => None,
            })
            .collect()
    }
}

pub struct FakeWindow(pub Recorder);

impl FakeWindow {
    fn record(&mut self, command: WindowCommand) -> HostResult<()> {
        self.0.with(|r| {
            if r.window_unavailable {
                Err(HostError::Unavailable("main window"))
            } else {
                r.window.push(command);
                Ok(())
            }
        })
    }
}

impl WindowHost for FakeWindow {
    fn move_window_by(&mut self, delta: Delta) -> HostResult<()> {
        self.record(WindowCommand::MoveBy(delta))
    }
    fn resize_window_to(&mut self, size: Size) -> HostResult<()> {
        self.record(WindowCommand::ResizeTo(size))
    }
    fn set_click_through(&mut self, enabled: bool) -> HostResult<()> {
        self.record(WindowCommand::SetClickThrough(enabled))
    }
    fn reset_to_full_extent(&mut self) -> HostResult<()> {
        self.record(WindowCommand::ResetToFullExtent)
    }
    fn toggle_visibility(&mut self) -> HostResult<()> {
        self.record(WindowCommand::ToggleVisibility)
    }
    fn show_display_indicator(&mut self, index: usize) -> HostResult<()> {
        self.record(WindowCommand::ShowDisplayIndicator(index))
    }
    fn refresh_stealth_status(&mut self) -> HostResult<()> {
        self.record(WindowCommand::RefreshStealthStatus)
    }
    fn quit(&mut self) -> HostResult<()> {
        self.record(WindowCommand::Quit)
    }
}

pub struct FakeWebview(pub Recorder);

impl FakeWebview {
    fn record(&mut self, command: WebviewCommand) -> HostResult<()> {
        self.0.with(|r| r.webview.push(command));
        Ok(())
    }
}

impl WebviewHost for FakeWebview {
    fn load_url(&mut self, url: &str) -> HostResult<()> {
        self.record(WebviewCommand::Load(url.to_string()))
    }
    fn show(&mut self) -> HostResult<()> {
        self.record(WebviewCommand::Show)
    }
    fn hide(&mut self) -> HostResult<()> {
        self.record(WebviewCommand::Hide)
    }
    fn reload(&mut self) -> HostResult<()> {
        self.record(WebviewCommand::Reload)
    }
    fn go_back(&mut self) -> HostResult<()> {
        self.record(WebviewCommand::GoBack)
    }
    fn go_forward(&mut self) -> HostResult<()> {
        self.record(WebviewCommand::GoForward)
    }
    fn focus(&mut self) -> HostResult<()> {
        self.record(WebviewCommand::Focus)
    }
    fn eval(&mut self, script: &str) -> HostResult<()> {
        self.record(WebviewCommand::Eval(script.to_string()))
    }
}

pub struct FakeSurface(pub Recorder);

impl Surface for FakeSurface {
    fn render(&mut self, view: &OverlayView) {
        self.0.with(|r| r.views.push(view.clone()));
    }

    fn notify(&mut self, notice: &Notice) {
        self.0.with(|r| r.notices.push(notice.clone()));
    }
}

pub fn overlay(recorder: &Recorder) -> Overlay {
    Overlay::new(
        Box::new(FakeWindow(recorder.clone())),
        Box::new(FakeWebview(recorder.clone())),
        Box::new(FakeSurface(recorder.clone())),
    )
}

pub struct FakeScreen {
    pub displays: HostResult<Vec<DisplayDescriptor>>,
    pub capture: HostResult<Screenshot>,
    pub clipboard: Mutex<Vec<Screenshot>>,
}

impl Default for FakeScreen {
    fn default() -> Self {
        Self {
            displays: Ok(vec![display(0, true), display(1, false)]),
            capture: Ok(Screenshot::new(2, 2, vec![255; 16])),
            clipboard: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ScreenHost for FakeScreen {
    async fn capture_screen(&self) -> HostResult<Screenshot> {
        self.capture.clone()
    }

    async fn list_displays(&self) -> HostResult<Vec<DisplayDescriptor>> {
        self.displays.clone()
    }

    async fn write_clipboard_image(&self, shot: &Screenshot) -> HostResult<()> {
        self.clipboard.lock().unwrap().push(shot.clone());
        Ok(())
    }
}

pub fn display(index: usize, primary: bool) -> DisplayDescriptor {
    DisplayDescriptor {
        id: index as u32 + 1,
        index,
        label: None,
        bounds: ScreenRect::new(index as i32 * 1920, 0, 1920, 1080),
        primary,
    }
}

#[derive(Default)]
pub struct MemorySettings {
    pub current: Mutex<Settings>,
    pub persisted: Mutex<Vec<Settings>>,
}

impl MemorySettings {
    pub fn seen_tutorial() -> Self {
        let store = Self::default();
        store.current.lock().unwrap().has_seen_tutorial = true;
        store
    }
}

#[async_trait]
impl SettingsStore for MemorySettings {
    async fn load(&self) -> HostResult<Settings> {
        Ok(self.current.lock().unwrap().clone())
    }

    async fn persist(&self, settings: &Settings) -> HostResult<()> {
        *self.current.lock().unwrap() = settings.clone();
        self.persisted.lock().unwrap().push(settings.clone());
        Ok(())
    }
}

pub struct FakeAuth {
    pub result: Result<AuthUser, AuthError>,
}

impl Default for FakeAuth {
    fn default() -> Self {
        Self {
            result: Ok(user()),
        }
    }
}

pub fn user() -> AuthUser {
    AuthUser {
        id: "u-1".to_string(),
        email: "bee@hive.io".to_string(),
        name: Some("Bee".to_string()),
    }
}

#[async_trait]
impl AuthBackend for FakeAuth {
    async fn sign_in(&self, _email: &str, _password: &str) -> Result<AuthUser, AuthError> {
        self.result.clone()
    }

    async fn sign_up(&self, _email: &str, _password: &str, _name: &str) -> Result<AuthUser, AuthError> {
        self.result.clone()
    }

    async fn sign_in_with_oauth(&self, _provider: OAuthProvider) -> Result<(), AuthError> {
        Ok(())
    }
}

pub fn collaborators(screen: FakeScreen, settings: Arc<dyn SettingsStore>) -> Collaborators {
    Collaborators {
        screen: Arc::new(screen),
        settings,
        auth: Arc::new(FakeAuth::default()),
    }
}

/// Drives an [`Overlay`] by hand: timers and tasks are collected instead of
/// being run, so tests decide when each one fires.
pub struct Harness {
    pub overlay: Overlay,
    pub recorder: Recorder,
    pub timers: Vec<(Duration, Timer)>,
    pub tasks: Vec<Task>,
}

impl Harness {
    pub fn new() -> Self {
        let recorder = Recorder::default();
        Self {
            overlay: overlay(&recorder),
            recorder,
            timers: Vec::new(),
            tasks: Vec::new(),
        }
    }

    pub fn send(&mut self, event: UiEvent) -> Outbox {
        let outbox = self.overlay.dispatch(event);
        self.timers.extend(outbox.timers.iter().copied());
        self.tasks.extend(outbox.tasks.iter().cloned());
        outbox
    }

    /// Fire every collected timer matching `pred`, in arming order.
    pub fn fire_where(&mut self, pred: impl Fn(&Timer) -> bool) {
        let (due, rest): (Vec<_>, Vec<_>) = self.timers.drain(..).partition(|(_, t)| pred(t));
        self.timers = rest;
        for (_, timer) in due {
            self.send(UiEvent::Timer(timer));
        }
    }

    pub fn take_tasks(&mut self) -> Vec<Task> {
        std::mem::take(&mut self.tasks)
    }

    pub fn view(&self) -> OverlayView {
        self.overlay.view()
    }
}

//! The coordinator: routes UI events to controllers and applies their effects.

use serde::Serialize;
use std::fmt::Debug;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::auth::{self, AuthError, AuthForm, AuthStatus};
use crate::config::constants::{SCREENSHOT_PASTE_DELAY, TUTORIAL_AUTO_SHOW_DELAY};
use crate::controllers::{
    ClickThroughController, DragController, HoverPanelController, Navigation, ServiceSelector,
    SessionController, StepView, TutorialController,
};
use crate::display::{DisplayOption, DisplaySelector};
use crate::effect::{Effect, Effects, Notice, Timer, WebviewCommand, WindowCommand};
use crate::error::HostError;
use crate::event::{Task, UiEvent};
use crate::host::{StealthStatus, Surface, WebviewHost, WindowHost};
use crate::region::{Facts, LayoutSnapshot, RegionId, RegionListener};
use crate::service::AiService;
use crate::settings::Settings;
use crate::shortcuts::ShortcutCommand;
use crate::validation::validate_delta;
use crate::webview;

pub const START_SESSION_FIRST: &str = "Please start the interview first!";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelView {
    pub visible: bool,
    pub fading: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub active: bool,
    pub service: Option<AiService>,
    pub control_label: &'static str,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StealthView {
    pub label: &'static str,
    pub platform: String,
}

/// Everything the surface draws, rebuilt after every event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayView {
    pub click_through: bool,
    pub dragging: bool,
    pub panel: PanelView,
    pub selector_visible: bool,
    pub session: SessionView,
    pub tutorial: Option<StepView>,
    pub displays: Vec<DisplayOption>,
    pub selected_display: usize,
    pub output_lang: Option<String>,
    pub code_lang: Option<String>,
    pub stealth: Option<StealthView>,
    pub auth: AuthStatus,
}

/// Work the coordinator cannot do synchronously.
#[derive(Debug, Default, PartialEq)]
pub struct Outbox {
    pub timers: Vec<(Duration, Timer)>,
    pub tasks: Vec<Task>,
}

impl Outbox {
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty() && self.tasks.is_empty()
    }
}

/// Owns every controller plus the synchronous host handles.
pub struct Overlay {
    window: Box<dyn WindowHost>,
    webview: Box<dyn WebviewHost>,
    surface: Box<dyn Surface>,

    click_through: ClickThroughController,
    drag: DragController,
    panel: HoverPanelController,
    selector: ServiceSelector,
    session: SessionController,
    tutorial: TutorialController,
    displays: DisplaySelector,

    layout: LayoutSnapshot,
    settings: Settings,
    stealth: Option<StealthStatus>,
    auth: AuthStatus,
    auth_form: AuthForm,
    last_view: Option<OverlayView>,
}

impl Overlay {
    pub fn new(
        window: Box<dyn WindowHost>,
        webview: Box<dyn WebviewHost>,
        surface: Box<dyn Surface>,
    ) -> Self {
        Self {
            window,
            webview,
            surface,
            click_through: ClickThroughController::default(),
            drag: DragController::new(),
            panel: HoverPanelController::new(),
            selector: ServiceSelector::new(),
            session: SessionController::new(),
            tutorial: TutorialController::new(),
            displays: DisplaySelector::default(),
            layout: LayoutSnapshot::default(),
            settings: Settings::default(),
            stealth: None,
            auth: AuthStatus::default(),
            auth_form: AuthForm::Login,
            last_view: None,
        }
    }

    pub fn facts(&self) -> Facts {
        Facts {
            tutorial_active: self.tutorial.is_active(),
            session_active: self.session.is_active(),
        }
    }

    pub fn session(&self) -> &SessionController {
        &self.session
    }

    pub fn tutorial(&self) -> &TutorialController {
        &self.tutorial
    }

    pub fn panel(&self) -> &HoverPanelController {
        &self.panel
    }

    pub fn selector(&self) -> &ServiceSelector {
        &self.selector
    }

    pub fn click_through(&self) -> &ClickThroughController {
        &self.click_through
    }

    pub fn drag(&self) -> &DragController {
        &self.drag
    }

    pub fn displays(&self) -> &DisplaySelector {
        &self.displays
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn auth_status(&self) -> &AuthStatus {
        &self.auth
    }

    /// Handle one event. Window and webview commands are applied before this
    /// returns; timers and tasks are handed back to the caller.
    pub fn dispatch(&mut self, event: UiEvent) -> Outbox {
        let mut fx = Effects::new();
        self.handle(event, &mut fx);
        let outbox = self.apply(fx);
        self.publish();
        outbox
    }

    pub fn view(&self) -> OverlayView {
        OverlayView {
            click_through: self.click_through.is_enabled(),
            dragging: self.drag.is_dragging(),
            panel: PanelView {
                visible: self.panel.is_visible(),
                fading: self.panel.is_fading(),
            },
            selector_visible: self.selector.is_visible(),
            session: SessionView {
                active: self.session.is_active(),
                service: self.session.service(),
                control_label: self.session.control_label(),
                status: self.session.status().to_string(),
            },
            tutorial: self.tutorial.view(),
            displays: self.displays.options().to_vec(),
            selected_display: self.displays.selected(),
            output_lang: self.settings.output_lang.clone(),
            code_lang: self.settings.code_lang.clone(),
            stealth: self.stealth.as_ref().map(|s| StealthView {
                label: s.label(),
                platform: s.platform.clone(),
            }),
            auth: self.auth.clone(),
        }
    }

    fn listeners(&mut self) -> [&mut dyn RegionListener; 2] {
        [&mut self.click_through, &mut self.panel]
    }

    fn handle(&mut self, event: UiEvent, fx: &mut Effects) {
        match event {
            UiEvent::Started => {
                info!("Overlay started");
                let facts = self.facts();
                self.click_through.restore(facts, fx);
                fx.window(WindowCommand::RefreshStealthStatus);
                fx.spawn(Task::LoadSettings);
                fx.spawn(Task::ListDisplays);
            }

            UiEvent::PointerEnter(region) => {
                let facts = self.facts();
                for listener in self.listeners() {
                    if listener.listens_to(region) {
                        listener.on_enter(region, facts, fx);
                    }
                }
            }
            UiEvent::PointerLeave(region) => {
                let facts = self.facts();
                for listener in self.listeners() {
                    if listener.listens_to(region) {
                        listener.on_leave(region, facts, fx);
                    }
                }
            }
            UiEvent::Click(region) => self.on_click(region, fx),

            UiEvent::PointerDown { region, screen } => {
                if region == RegionId::DragHandle {
                    let facts = self.facts();
                    self.drag.begin(screen, facts);
                }
            }
            UiEvent::PointerMove { screen } => self.drag.pointer_move(screen, fx),
            UiEvent::PointerUp => self.drag.end(),

            UiEvent::LayoutChanged(layout) => {
                self.layout = layout;
                self.tutorial.render(&self.layout);
            }
            UiEvent::ResizeRequested(size) => fx.window(WindowCommand::ResizeTo(size)),

            UiEvent::SelectService(service) => {
                if let Some(service) = self.selector.select(service) {
                    if let Err(e) = self.session.start(service, fx) {
                        warn!("{}", e);
                    }
                }
            }
            UiEvent::CancelServiceSelector => {
                self.selector.cancel();
            }

            UiEvent::TutorialNext => match self.tutorial.next(&self.layout) {
                Navigation::Finished => self.after_tutorial_closed(fx),
                Navigation::Moved | Navigation::Unchanged => {}
            },
            UiEvent::TutorialPrev => {
                self.tutorial.prev(&self.layout);
            }
            UiEvent::TutorialClose => {
                if self.tutorial.hide() {
                    self.after_tutorial_closed(fx);
                }
            }

            UiEvent::WebviewReady => self.session.on_ready(fx),
            UiEvent::WebviewClose => {
                self.session.stop(fx);
            }
            UiEvent::WebviewBack => self.navigate(WebviewCommand::GoBack, fx),
            UiEvent::WebviewForward => self.navigate(WebviewCommand::GoForward, fx),
            UiEvent::WebviewReload => self.navigate(WebviewCommand::Reload, fx),
            UiEvent::SendPrompt(prompt) => {
                self.session.send_prompt(prompt, fx);
            }
            UiEvent::SendContext => match self.settings.context_message() {
                Some(message) => {
                    self.session.send_prompt(message, fx);
                }
                None => debug!("No code language set; nothing to send"),
            },
            UiEvent::SetLanguages {
                output_lang,
                code_lang,
            } => {
                if self.settings.output_lang != output_lang || self.settings.code_lang != code_lang {
                    self.settings.output_lang = output_lang;
                    self.settings.code_lang = code_lang;
                    fx.spawn(Task::PersistSettings(self.settings.clone()));
                }
            }

            UiEvent::DisplayHovered(index) => {
                if self.displays.contains(index) {
                    fx.window(WindowCommand::ShowDisplayIndicator(index));
                }
            }
            UiEvent::DisplayChosen(index) => {
                if self.displays.select(index) {
                    info!("Display {} selected", index + 1);
                    fx.window(WindowCommand::ShowDisplayIndicator(index));
                    self.settings.selected_display = Some(index);
                    fx.spawn(Task::PersistSettings(self.settings.clone()));
                } else {
                    warn!("Ignoring unknown display index {}", index);
                }
            }

            UiEvent::Shortcut(command) => {
                debug!("Shortcut: {:?}", command);
                match command {
                    ShortcutCommand::ToggleVisibility => fx.window(WindowCommand::ToggleVisibility),
                    ShortcutCommand::Screenshot => fx.spawn(Task::CaptureScreen),
                    ShortcutCommand::ToggleVoice => fx.notify(Notice::VoiceToggle),
                }
            }

            UiEvent::SignIn { email, password } => {
                self.auth_form = AuthForm::Login;
                match auth::validate_sign_in(&email, password.expose()) {
                    Ok(()) => {
                        self.auth = AuthStatus::Pending;
                        fx.spawn(Task::SignIn {
                            email: email.trim().to_string(),
                            password,
                        });
                    }
                    Err(e) => self.auth_failed(AuthForm::Login, e),
                }
            }
            UiEvent::SignUp {
                email,
                password,
                name,
            } => {
                self.auth_form = AuthForm::Signup;
                match auth::validate_sign_up(&email, password.expose(), &name) {
                    Ok(()) => {
                        self.auth = AuthStatus::Pending;
                        fx.spawn(Task::SignUp {
                            email: email.trim().to_string(),
                            password,
                            name: name.trim().to_string(),
                        });
                    }
                    Err(e) => self.auth_failed(AuthForm::Signup, e),
                }
            }
            UiEvent::SignInWithOAuth(provider) => {
                info!("Starting {} sign-in", provider.display_name());
                self.auth_form = AuthForm::Login;
                self.auth = AuthStatus::Pending;
                fx.spawn(Task::SignInWithOAuth(provider));
            }
            UiEvent::OAuthStarted(result) => {
                if let Err(e) = result {
                    self.auth_failed(AuthForm::Login, e);
                }
            }
            UiEvent::OAuthFinished(result) => match result {
                Ok(user) => self.signed_in(user),
                Err(raw) => self.auth_failed(AuthForm::Login, AuthError::Backend(raw)),
            },
            UiEvent::AuthFinished(result) => match result {
                Ok(user) => self.signed_in(user),
                Err(e) => self.auth_failed(self.auth_form, e),
            },

            UiEvent::Timer(timer) => self.on_timer(timer, fx),

            UiEvent::SettingsLoaded(result) => {
                match result {
                    Ok(settings) => self.settings = settings,
                    Err(e) => error!("Failed to load settings, using defaults: {}", e),
                }
                if let Some(index) = self.settings.selected_display {
                    self.displays.select(index);
                }
                if !self.settings.has_seen_tutorial {
                    fx.schedule(TUTORIAL_AUTO_SHOW_DELAY, Timer::TutorialAutoShow);
                }
            }
            UiEvent::SettingsPersisted(result) => match result {
                Ok(()) => debug!("Settings saved"),
                Err(e) => error!("Failed to save settings: {}", e),
            },
            UiEvent::DisplaysListed(result) => match result {
                Ok(displays) => {
                    info!("Found {} display(s)", displays.len());
                    self.displays
                        .populate(&displays, self.settings.selected_display);
                }
                Err(e) => {
                    warn!("Failed to list displays: {}", e);
                    self.displays.use_fallback();
                }
            },
            UiEvent::ScreenCaptured(result) => match result {
                Err(e) => {
                    error!("Screenshot failed: {}", e);
                    fx.notify(Notice::Alert(format!("Failed to capture screenshot: {}", e)));
                }
                Ok(_) if !self.session.is_active() => {
                    fx.notify(Notice::Alert(START_SESSION_FIRST.to_string()));
                }
                Ok(shot) => fx.spawn(Task::WriteClipboard(shot)),
            },
            UiEvent::ClipboardWritten(result) => match result {
                Ok(()) => {
                    fx.webview(WebviewCommand::Focus);
                    fx.schedule(SCREENSHOT_PASTE_DELAY, Timer::ScreenshotPaste);
                }
                Err(e) => {
                    error!("Failed to copy screenshot: {}", e);
                    fx.notify(Notice::Alert(format!("Failed to capture screenshot: {}", e)));
                }
            },
            UiEvent::StealthReported(status) => {
                info!(
                    "Stealth mode {} on {} {}",
                    status.label(),
                    status.platform,
                    status.version
                );
                self.stealth = Some(status);
            }

            UiEvent::Shutdown => {
                info!("Overlay shutting down");
                self.drag.end();
            }
        }
    }

    fn on_click(&mut self, region: RegionId, fx: &mut Effects) {
        let facts = self.facts();
        for listener in self.listeners() {
            if listener.listens_to(region) {
                listener.on_click(region, facts, fx);
            }
        }

        match region {
            RegionId::StartButton => {
                if self.session.is_active() {
                    self.session.stop(fx);
                } else if self.selector.is_visible() {
                    self.selector.cancel();
                } else {
                    self.selector.show();
                    self.panel.hide();
                }
            }
            RegionId::SettingsButton => self.panel.show(fx),
            RegionId::ScreenshotButton => fx.spawn(Task::CaptureScreen),
            RegionId::TutorialButton => {
                self.panel.hide();
                self.show_tutorial(fx);
            }
            RegionId::QuitButton => {
                info!("Quit requested");
                fx.window(WindowCommand::Quit);
            }
            _ => {}
        }
    }

    fn on_timer(&mut self, timer: Timer, fx: &mut Effects) {
        match timer {
            Timer::AnimationFrame { generation } => self.drag.on_frame(generation, fx),
            Timer::PanelLeaveCheck { .. } | Timer::PanelIdle { .. } | Timer::PanelFade { .. } => {
                self.panel.on_timer(timer, fx)
            }
            Timer::TutorialAutoShow => {
                if !self.settings.has_seen_tutorial && !self.tutorial.is_active() {
                    self.show_tutorial(fx);
                }
            }
            Timer::ScreenshotPaste => match self.session.service() {
                Some(service) => fx.webview(WebviewCommand::Eval(webview::paste_script(service))),
                None => debug!("Session ended before the screenshot paste"),
            },
        }
    }

    fn show_tutorial(&mut self, fx: &mut Effects) {
        self.drag.end();
        self.tutorial.show(&self.layout, fx);
        self.click_through.disable(fx);
    }

    fn after_tutorial_closed(&mut self, fx: &mut Effects) {
        let facts = self.facts();
        self.click_through.restore(facts, fx);
        if !self.settings.has_seen_tutorial {
            self.settings.has_seen_tutorial = true;
            fx.spawn(Task::PersistSettings(self.settings.clone()));
        }
    }

    fn navigate(&mut self, command: WebviewCommand, fx: &mut Effects) {
        if self.session.is_active() {
            fx.webview(command);
        } else {
            debug!("Ignoring {:?} without an active session", command);
        }
    }

    fn signed_in(&mut self, user: auth::AuthUser) {
        info!("Signed in as {}", user.email);
        self.auth = AuthStatus::SignedIn { user };
    }

    fn auth_failed(&mut self, form: AuthForm, error: AuthError) {
        warn!("Authentication failed: {}", error);
        self.auth = AuthStatus::Failed {
            form,
            message: auth::user_message(form, &error),
        };
    }

    fn apply(&mut self, mut fx: Effects) -> Outbox {
        let mut outbox = Outbox::default();
        for effect in fx.drain() {
            match effect {
                Effect::Window(command) => self.apply_window(command),
                Effect::Webview(command) => self.apply_webview(command),
                Effect::Schedule { after, timer } => outbox.timers.push((after, timer)),
                Effect::Spawn(task) => outbox.tasks.push(task),
                Effect::Notify(notice) => self.surface.notify(&notice),
            }
        }
        outbox
    }

    fn apply_window(&mut self, command: WindowCommand) {
        let window = &mut self.window;
        let result = match &command {
            WindowCommand::MoveBy(delta) => validate_delta(*delta)
                .map_err(HostError::from)
                .and_then(|delta| window.move_window_by(delta)),
            WindowCommand::ResizeTo(size) => window.resize_window_to(*size),
            WindowCommand::SetClickThrough(enabled) => window.set_click_through(*enabled),
            WindowCommand::ResetToFullExtent => window.reset_to_full_extent(),
            WindowCommand::ToggleVisibility => window.toggle_visibility(),
            WindowCommand::ShowDisplayIndicator(index) => window.show_display_indicator(*index),
            WindowCommand::RefreshStealthStatus => window.refresh_stealth_status(),
            WindowCommand::Quit => window.quit(),
        };
        if let Err(e) = result {
            report_host_error("window", &command, e);
        }
    }

    fn apply_webview(&mut self, command: WebviewCommand) {
        let webview = &mut self.webview;
        let result = match &command {
            WebviewCommand::Load(url) => webview.load_url(url),
            WebviewCommand::Show => webview.show(),
            WebviewCommand::Hide => webview.hide(),
            WebviewCommand::Reload => webview.reload(),
            WebviewCommand::GoBack => webview.go_back(),
            WebviewCommand::GoForward => webview.go_forward(),
            WebviewCommand::Focus => webview.focus(),
            WebviewCommand::Eval(script) => webview.eval(script),
        };
        if let Err(e) = result {
            report_host_error("webview", &command, e);
        }
    }

    fn publish(&mut self) {
        let view = self.view();
        if self.last_view.as_ref() != Some(&view) {
            self.surface.render(&view);
            self.last_view = Some(view);
        }
    }
}

/// A missing collaborator is expected (window closing, view not built yet).
fn report_host_error(collaborator: &str, command: &dyn Debug, error: HostError) {
    if error.is_unavailable() {
        debug!("Dropped {} command {:?}: {}", collaborator, command, error);
    } else {
        warn!("{} command {:?} failed: {}", collaborator, command, error);
    }
}

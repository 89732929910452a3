use crate::auth::{AuthError, AuthUser, OAuthProvider, Secret};
use crate::display::DisplayDescriptor;
use crate::effect::Timer;
use crate::error::HostError;
use crate::geometry::{Point, Size};
use crate::host::{Screenshot, StealthStatus};
use crate::region::{LayoutSnapshot, RegionId};
use crate::service::AiService;
use crate::settings::Settings;
use crate::shortcuts::ShortcutCommand;

/// Everything that enters the overlay's event queue.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Application start: load settings and enumerate displays.
    Started,

    PointerEnter(RegionId),
    PointerLeave(RegionId),
    PointerDown { region: RegionId, screen: Point },
    PointerMove { screen: Point },
    PointerUp,
    Click(RegionId),
    LayoutChanged(LayoutSnapshot),
    ResizeRequested(Size),

    SelectService(AiService),
    CancelServiceSelector,

    TutorialNext,
    TutorialPrev,
    TutorialClose,

    WebviewReady,
    WebviewClose,
    WebviewBack,
    WebviewForward,
    WebviewReload,
    SendPrompt(String),

    SetLanguages {
        output_lang: Option<String>,
        code_lang: Option<String>,
    },
    /// Send the language preferences into the active chat.
    SendContext,

    DisplayHovered(usize),
    DisplayChosen(usize),

    Shortcut(ShortcutCommand),

    SignIn { email: String, password: Secret },
    SignUp { email: String, password: Secret, name: String },
    SignInWithOAuth(OAuthProvider),
    /// Out-of-band completion of an external OAuth flow.
    OAuthFinished(Result<AuthUser, String>),

    Timer(Timer),

    SettingsLoaded(Result<Settings, HostError>),
    SettingsPersisted(Result<(), HostError>),
    DisplaysListed(Result<Vec<DisplayDescriptor>, HostError>),
    ScreenCaptured(Result<Screenshot, HostError>),
    ClipboardWritten(Result<(), HostError>),
    StealthReported(StealthStatus),
    AuthFinished(Result<AuthUser, AuthError>),
    OAuthStarted(Result<(), AuthError>),

    Shutdown,
}

/// Asynchronous collaborator calls; each completion re-enters the queue as a
/// [`UiEvent`].
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    LoadSettings,
    PersistSettings(Settings),
    ListDisplays,
    CaptureScreen,
    WriteClipboard(Screenshot),
    SignIn { email: String, password: Secret },
    SignUp { email: String, password: Secret, name: String },
    SignInWithOAuth(OAuthProvider),
}

impl Task {
    pub fn name(&self) -> &'static str {
        match self {
            Task::LoadSettings => "load-settings",
            Task::PersistSettings(_) => "persist-settings",
            Task::ListDisplays => "list-displays",
            Task::CaptureScreen => "capture-screen",
            Task::WriteClipboard(_) => "write-clipboard",
            Task::SignIn { .. } => "sign-in",
            Task::SignUp { .. } => "sign-up",
            Task::SignInWithOAuth(_) => "oauth",
        }
    }
}

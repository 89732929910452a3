//! Single-consumer event loop around [`Overlay`].

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::auth::AuthBackend;
use crate::effect::Timer;
use crate::event::{Task, UiEvent};
use crate::host::ScreenHost;
use crate::overlay::{Outbox, Overlay};
use crate::settings::SettingsStore;

/// Asynchronous collaborators, shared with spawned tasks.
#[derive(Clone)]
pub struct Collaborators {
    pub screen: Arc<dyn ScreenHost>,
    pub settings: Arc<dyn SettingsStore>,
    pub auth: Arc<dyn AuthBackend>,
}

#[derive(Debug, Error)]
#[error("overlay runtime has stopped")]
pub struct RuntimeClosed;

/// Posts events into the runtime's queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct OverlayHandle {
    tx: mpsc::UnboundedSender<UiEvent>,
}

impl OverlayHandle {
    pub fn send(&self, event: UiEvent) -> Result<(), RuntimeClosed> {
        self.tx.send(event).map_err(|_| RuntimeClosed)
    }
}

pub struct OverlayRuntime {
    overlay: Overlay,
    collaborators: Collaborators,
    tx: mpsc::UnboundedSender<UiEvent>,
    rx: mpsc::UnboundedReceiver<UiEvent>,
}

impl OverlayRuntime {
    pub fn new(overlay: Overlay, collaborators: Collaborators) -> (Self, OverlayHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = OverlayHandle { tx: tx.clone() };
        let runtime = Self {
            overlay,
            collaborators,
            tx,
            rx,
        };
        (runtime, handle)
    }

    pub fn handle(&self) -> OverlayHandle {
        OverlayHandle {
            tx: self.tx.clone(),
        }
    }

    /// Process events until [`UiEvent::Shutdown`]. Hands the overlay back so
    /// callers can inspect its final state.
    pub async fn run(mut self) -> Overlay {
        info!("Overlay runtime started");
        while let Some(event) = self.rx.recv().await {
            let shutdown = matches!(event, UiEvent::Shutdown);
            let outbox = self.overlay.dispatch(event);
            if shutdown {
                break;
            }
            self.drain(outbox);
        }
        info!("Overlay runtime stopped");
        self.overlay
    }

    fn drain(&self, outbox: Outbox) {
        for (after, timer) in outbox.timers {
            self.arm(after, timer);
        }
        for task in outbox.tasks {
            self.spawn(task);
        }
    }

    fn arm(&self, after: std::time::Duration, timer: Timer) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            // The loop may already be gone at shutdown.
            let _ = tx.send(UiEvent::Timer(timer));
        });
    }

    fn spawn(&self, task: Task) {
        let tx = self.tx.clone();
        let hosts = self.collaborators.clone();
        let name = task.name();
        debug!("Running task {}", name);

        tokio::spawn(async move {
            let event = match task {
                Task::LoadSettings => UiEvent::SettingsLoaded(hosts.settings.load().await),
                Task::PersistSettings(settings) => {
                    UiEvent::SettingsPersisted(hosts.settings.persist(&settings).await)
                }
                Task::ListDisplays => UiEvent::DisplaysListed(hosts.screen.list_displays().await),
                Task::CaptureScreen => UiEvent::ScreenCaptured(hosts.screen.capture_screen().await),
                Task::WriteClipboard(shot) => {
                    UiEvent::ClipboardWritten(hosts.screen.write_clipboard_image(&shot).await)
                }
                Task::SignIn { email, password } => {
                    UiEvent::AuthFinished(hosts.auth.sign_in(&email, password.expose()).await)
                }
                Task::SignUp {
                    email,
                    password,
                    name,
                } => UiEvent::AuthFinished(
                    hosts
                        .auth
                        .sign_up(&email, password.expose(), &name)
                        .await,
                ),
                Task::SignInWithOAuth(provider) => {
                    UiEvent::OAuthStarted(hosts.auth.sign_in_with_oauth(provider).await)
                }
            };

            if tx.send(event).is_err() {
                debug!("Runtime stopped before task {} completed", name);
            }
        });
    }
}

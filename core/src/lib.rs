//! Interaction layer of the Buzz desktop overlay.
//!
//! Controllers are plain state machines that push [`effect::Effect`]s; the
//! [`overlay::Overlay`] coordinator applies them against the host traits in
//! [`host`], and [`runtime::OverlayRuntime`] drives it from a single event queue.

pub mod auth;
pub mod config;
pub mod controllers;
pub mod display;
pub mod effect;
pub mod error;
pub mod event;
pub mod geometry;
pub mod host;
pub mod logging;
pub mod overlay;
pub mod paths;
pub mod region;
pub mod runtime;
pub mod service;
pub mod settings;
pub mod shortcuts;
pub mod validation;
pub mod webview;

pub use effect::{Effect, Effects, Notice, Timer, WebviewCommand, WindowCommand};
pub use error::{HostError, HostResult, SessionError};
pub use event::{Task, UiEvent};
pub use overlay::{Outbox, Overlay, OverlayView};
pub use region::{Facts, LayoutSnapshot, RegionId, RegionListener};
pub use runtime::{Collaborators, OverlayHandle, OverlayRuntime};
pub use service::AiService;

//! IPC commands invoked by the overlay page. Each one validates its input and
//! posts a [`UiEvent`] to the overlay runtime.

use tauri::State;
use tracing::{error, warn};

use buzz_core::auth::{OAuthProvider, Secret};
use buzz_core::geometry::{Point, Size};
use buzz_core::validation::{
    sanitize_multiline, sanitize_string, validate_dimensions, validate_display_index,
};
use buzz_core::{AiService, LayoutSnapshot, OverlayHandle, OverlayView, RegionId, UiEvent};

use crate::hosts::ViewCache;

type CommandResult<T = ()> = Result<T, String>;

fn forward(handle: &OverlayHandle, event: UiEvent) -> CommandResult {
    handle.send(event).map_err(|e| {
        error!("Dropping UI event: {}", e);
        e.to_string()
    })
}

fn optional_text(value: Option<String>) -> CommandResult<Option<String>> {
    value
        .map(|v| sanitize_string(v.trim()).map_err(|e| e.to_string()))
        .transpose()
        .map(|v| v.filter(|s| !s.is_empty()))
}

pub(crate) fn resize_event(width: u32, height: u32) -> CommandResult<UiEvent> {
    validate_dimensions(Size::new(width, height))
        .map(UiEvent::ResizeRequested)
        .map_err(|e| {
            warn!("Rejected resize: {}", e);
            e.to_string()
        })
}

pub(crate) fn prompt_event(prompt: &str) -> CommandResult<UiEvent> {
    let prompt = sanitize_multiline(prompt).map_err(|e| e.to_string())?;
    if prompt.trim().is_empty() {
        return Err("Prompt is empty".to_string());
    }
    Ok(UiEvent::SendPrompt(prompt))
}

pub(crate) fn service_event(service: &str) -> CommandResult<UiEvent> {
    service
        .parse::<AiService>()
        .map(UiEvent::SelectService)
        .map_err(|e| e.to_string())
}

pub(crate) fn languages_event(
    output_lang: Option<String>,
    code_lang: Option<String>,
) -> CommandResult<UiEvent> {
    Ok(UiEvent::SetLanguages {
        output_lang: optional_text(output_lang)?,
        code_lang: optional_text(code_lang)?,
    })
}

// MARK: - Pointer and layout

#[tauri::command]
pub fn pointer_enter(handle: State<'_, OverlayHandle>, region: RegionId) -> CommandResult {
    forward(&handle, UiEvent::PointerEnter(region))
}

#[tauri::command]
pub fn pointer_leave(handle: State<'_, OverlayHandle>, region: RegionId) -> CommandResult {
    forward(&handle, UiEvent::PointerLeave(region))
}

#[tauri::command]
pub fn pointer_down(
    handle: State<'_, OverlayHandle>,
    region: RegionId,
    x: i32,
    y: i32,
) -> CommandResult {
    forward(
        &handle,
        UiEvent::PointerDown {
            region,
            screen: Point::new(x, y),
        },
    )
}

#[tauri::command]
pub fn pointer_move(handle: State<'_, OverlayHandle>, x: i32, y: i32) -> CommandResult {
    forward(
        &handle,
        UiEvent::PointerMove {
            screen: Point::new(x, y),
        },
    )
}

#[tauri::command]
pub fn pointer_up(handle: State<'_, OverlayHandle>) -> CommandResult {
    forward(&handle, UiEvent::PointerUp)
}

#[tauri::command]
pub fn click(handle: State<'_, OverlayHandle>, region: RegionId) -> CommandResult {
    forward(&handle, UiEvent::Click(region))
}

#[tauri::command]
pub fn report_layout(handle: State<'_, OverlayHandle>, layout: LayoutSnapshot) -> CommandResult {
    forward(&handle, UiEvent::LayoutChanged(layout))
}

#[tauri::command]
pub fn request_resize(handle: State<'_, OverlayHandle>, width: u32, height: u32) -> CommandResult {
    forward(&handle, resize_event(width, height)?)
}

#[tauri::command]
pub fn current_view(cache: State<'_, ViewCache>) -> Option<OverlayView> {
    cache.latest()
}

// MARK: - Session

#[tauri::command]
pub fn select_service(handle: State<'_, OverlayHandle>, service: String) -> CommandResult {
    forward(&handle, service_event(&service)?)
}

#[tauri::command]
pub fn cancel_service_selector(handle: State<'_, OverlayHandle>) -> CommandResult {
    forward(&handle, UiEvent::CancelServiceSelector)
}

#[tauri::command]
pub fn webview_back(handle: State<'_, OverlayHandle>) -> CommandResult {
    forward(&handle, UiEvent::WebviewBack)
}

#[tauri::command]
pub fn webview_forward(handle: State<'_, OverlayHandle>) -> CommandResult {
    forward(&handle, UiEvent::WebviewForward)
}

#[tauri::command]
pub fn webview_reload(handle: State<'_, OverlayHandle>) -> CommandResult {
    forward(&handle, UiEvent::WebviewReload)
}

#[tauri::command]
pub fn webview_close(handle: State<'_, OverlayHandle>) -> CommandResult {
    forward(&handle, UiEvent::WebviewClose)
}

#[tauri::command]
pub fn send_prompt(handle: State<'_, OverlayHandle>, prompt: String) -> CommandResult {
    forward(&handle, prompt_event(&prompt)?)
}

#[tauri::command]
pub fn set_languages(
    handle: State<'_, OverlayHandle>,
    output_lang: Option<String>,
    code_lang: Option<String>,
) -> CommandResult {
    forward(&handle, languages_event(output_lang, code_lang)?)
}

#[tauri::command]
pub fn send_context(handle: State<'_, OverlayHandle>) -> CommandResult {
    forward(&handle, UiEvent::SendContext)
}

// MARK: - Tutorial

#[tauri::command]
pub fn tutorial_next(handle: State<'_, OverlayHandle>) -> CommandResult {
    forward(&handle, UiEvent::TutorialNext)
}

#[tauri::command]
pub fn tutorial_prev(handle: State<'_, OverlayHandle>) -> CommandResult {
    forward(&handle, UiEvent::TutorialPrev)
}

#[tauri::command]
pub fn tutorial_close(handle: State<'_, OverlayHandle>) -> CommandResult {
    forward(&handle, UiEvent::TutorialClose)
}

// MARK: - Displays

#[tauri::command]
pub fn display_hovered(handle: State<'_, OverlayHandle>, index: usize) -> CommandResult {
    let index = validate_display_index(index).map_err(|e| e.to_string())?;
    forward(&handle, UiEvent::DisplayHovered(index))
}

#[tauri::command]
pub fn display_chosen(handle: State<'_, OverlayHandle>, index: usize) -> CommandResult {
    let index = validate_display_index(index).map_err(|e| e.to_string())?;
    forward(&handle, UiEvent::DisplayChosen(index))
}

// MARK: - Auth

#[tauri::command]
pub fn sign_in(handle: State<'_, OverlayHandle>, email: String, password: String) -> CommandResult {
    forward(
        &handle,
        UiEvent::SignIn {
            email: email.trim().to_string(),
            password: Secret::new(password),
        },
    )
}

#[tauri::command]
pub fn sign_up(
    handle: State<'_, OverlayHandle>,
    email: String,
    password: String,
    name: String,
) -> CommandResult {
    let name = sanitize_string(name.trim()).map_err(|e| e.to_string())?;
    forward(
        &handle,
        UiEvent::SignUp {
            email: email.trim().to_string(),
            password: Secret::new(password),
            name,
        },
    )
}

#[tauri::command]
pub fn sign_in_with_oauth(handle: State<'_, OverlayHandle>, provider: String) -> CommandResult {
    let provider = provider
        .parse::<OAuthProvider>()
        .map_err(|e| e.to_string())?;
    forward(&handle, UiEvent::SignInWithOAuth(provider))
}

#[tauri::command]
pub async fn get_log_path() -> CommandResult<String> {
    buzz_core::paths::get_logs_dir()
        .map(|p| p.to_string_lossy().to_string())
        .map_err(|e| e.to_string())
}

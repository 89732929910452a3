#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

mod commands;
mod hosts;

use std::sync::Arc;
use tauri::{
    AppHandle, CustomMenuItem, GlobalShortcutManager, Manager, SystemTray, SystemTrayEvent,
    SystemTrayMenu, SystemTrayMenuItem,
};
use tracing::{error, info, warn};

use buzz_core::config::AppConfig;
use buzz_core::logging::{init_logging, log_platform_info};
use buzz_core::settings::JsonSettingsStore;
use buzz_core::shortcuts::{self, ShortcutCommand};
use buzz_core::{paths, Collaborators, Overlay, OverlayHandle, OverlayRuntime, RegionId, UiEvent};

use crate::hosts::{
    AiWebview, DesktopScreen, EventSurface, SupabaseAuth, TauriWindow, ViewCache, AI_VIEW_WINDOW,
};

fn main() {
    if let Err(e) = paths::ensure_directories_exist() {
        eprintln!("Warning: Failed to create app directories: {}", e);
    }

    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    init_logging(&config.logging);
    log_platform_info();
    info!("Starting Buzz");

    let system_tray = SystemTray::new().with_menu(create_tray_menu());

    tauri::Builder::default()
        .system_tray(system_tray)
        .on_system_tray_event(|app, event| {
            if let SystemTrayEvent::MenuItemClick { id, .. } = event {
                handle_tray_event(app, &id);
            }
        })
        .on_page_load(|window, payload| {
            if window.label() == AI_VIEW_WINDOW {
                info!("AI view loaded {}", payload.url());
                send(&window.app_handle(), UiEvent::WebviewReady);
            }
        })
        .invoke_handler(tauri::generate_handler![
            commands::pointer_enter,
            commands::pointer_leave,
            commands::pointer_down,
            commands::pointer_move,
            commands::pointer_up,
            commands::click,
            commands::report_layout,
            commands::request_resize,
            commands::current_view,
            commands::select_service,
            commands::cancel_service_selector,
            commands::webview_back,
            commands::webview_forward,
            commands::webview_reload,
            commands::webview_close,
            commands::send_prompt,
            commands::set_languages,
            commands::send_context,
            commands::tutorial_next,
            commands::tutorial_prev,
            commands::tutorial_close,
            commands::display_hovered,
            commands::display_chosen,
            commands::sign_in,
            commands::sign_up,
            commands::sign_in_with_oauth,
            commands::get_log_path,
        ])
        .setup(move |app| {
            let app_handle = app.handle();

            // Tray-only app: keep it out of the dock
            #[cfg(target_os = "macos")]
            app.set_activation_policy(tauri::ActivationPolicy::Accessory);

            if let Err(e) = start_overlay(&app_handle, &config) {
                error!("Setup failed: {}", e);
                let _ = tauri::api::notification::Notification::new(
                    &app.config().tauri.bundle.identifier,
                )
                .title("Buzz Failed to Start")
                .body(&format!("Error: {}", e))
                .show();
                return Err(e.into());
            }

            register_shortcuts(&app_handle, &config);
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("Error building Tauri application")
        .run(|app_handle, event| {
            if let tauri::RunEvent::ExitRequested { .. } = event {
                info!("Exit requested, stopping overlay runtime");
                if let Err(e) = app_handle.global_shortcut_manager().unregister_all() {
                    warn!("Failed to unregister shortcuts: {}", e);
                }
                send(app_handle, UiEvent::Shutdown);
            }
        });
}

/// Wire the hosts into an overlay runtime and start it.
fn start_overlay(app: &AppHandle, config: &AppConfig) -> anyhow::Result<()> {
    let window = TauriWindow::new(app.clone(), config.window.clone());
    if let Err(e) = window.apply_config() {
        warn!("Failed to apply window config: {}", e);
    }

    let views = ViewCache::default();
    let overlay = Overlay::new(
        Box::new(window),
        Box::new(AiWebview::new(app.clone())),
        Box::new(EventSurface::new(app.clone(), views.clone())),
    );

    let collaborators = Collaborators {
        screen: Arc::new(DesktopScreen),
        settings: Arc::new(JsonSettingsStore::at_default_location()?),
        auth: Arc::new(SupabaseAuth::new(
            config.auth.clone(),
            paths::get_auth_session_file().ok(),
        )),
    };

    let (runtime, handle) = OverlayRuntime::new(overlay, collaborators);
    app.manage(handle.clone());
    app.manage(views);

    tauri::async_runtime::spawn(async move {
        let overlay = runtime.run().await;
        info!(
            "Overlay runtime exited (session active: {})",
            overlay.session().is_active()
        );
    });

    handle.send(UiEvent::Started)?;
    Ok(())
}

fn register_shortcuts(app: &AppHandle, config: &AppConfig) {
    let mut manager = app.global_shortcut_manager();

    for (accelerator, command) in shortcuts::bindings(&config.shortcuts) {
        let app_handle = app.clone();
        let result = manager.register(&accelerator, move || {
            send(&app_handle, UiEvent::Shortcut(command));
        });
        match result {
            Ok(()) => info!("Registered {} for {:?}", accelerator, command),
            Err(e) => warn!("Failed to register {}: {}", accelerator, e),
        }
    }
}

/// Post an event to the runtime, if it is running.
fn send(app: &AppHandle, event: UiEvent) {
    match app.try_state::<OverlayHandle>() {
        Some(handle) => {
            if let Err(e) = handle.send(event) {
                warn!("{}", e);
            }
        }
        None => warn!("Overlay runtime not started, dropping {:?}", event),
    }
}

fn create_tray_menu() -> SystemTrayMenu {
    SystemTrayMenu::new()
        .add_item(CustomMenuItem::new("toggle", "Show/Hide Overlay"))
        .add_item(CustomMenuItem::new("screenshot", "Send Screenshot"))
        .add_item(CustomMenuItem::new("tutorial", "Show Tutorial"))
        .add_native_item(SystemTrayMenuItem::Separator)
        .add_item(CustomMenuItem::new("logs", "Open Logs Folder"))
        .add_native_item(SystemTrayMenuItem::Separator)
        .add_item(CustomMenuItem::new("quit", "Quit"))
}

fn handle_tray_event(app: &AppHandle, event_id: &str) {
    info!("Tray event: {}", event_id);

    match event_id {
        "toggle" => send(app, UiEvent::Shortcut(ShortcutCommand::ToggleVisibility)),
        "screenshot" => send(app, UiEvent::Shortcut(ShortcutCommand::Screenshot)),
        "tutorial" => send(app, UiEvent::Click(RegionId::TutorialButton)),
        "logs" => match paths::get_logs_dir() {
            Ok(dir) => {
                if let Err(e) = open::that(&dir) {
                    error!("Failed to open {:?}: {}", dir, e);
                }
            }
            Err(e) => error!("Failed to locate logs: {}", e),
        },
        "quit" => send(app, UiEvent::Click(RegionId::QuitButton)),
        _ => {}
    }
}

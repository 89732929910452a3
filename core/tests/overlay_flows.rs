mod common;

use buzz_core::auth::{AuthError, AuthForm, AuthStatus, OAuthProvider, Secret};
use buzz_core::controllers::{CardPlacement, PanelPhase};
use buzz_core::geometry::{Delta, Point, Rect, Size};
use buzz_core::host::{Screenshot, StealthStatus};
use buzz_core::settings::Settings;
use buzz_core::shortcuts::ShortcutCommand;
use buzz_core::{
    AiService, HostError, LayoutSnapshot, Notice, RegionId, Task, Timer, UiEvent, WebviewCommand,
    WindowCommand,
};

use common::{display, user, Harness};

fn settings_seen() -> Settings {
    Settings {
        has_seen_tutorial: true,
        ..Settings::default()
    }
}

/// A harness past startup, with the tutorial already seen.
fn started() -> Harness {
    let mut h = Harness::new();
    h.send(UiEvent::Started);
    h.send(UiEvent::SettingsLoaded(Ok(settings_seen())));
    h.take_tasks();
    h.recorder.clear();
    h
}

fn layout() -> LayoutSnapshot {
    LayoutSnapshot::new(Size::new(1280, 720))
        .with_region(RegionId::DragHandle, Rect::new(600.0, 20.0, 40.0, 40.0))
        .with_region(RegionId::StartButton, Rect::new(650.0, 20.0, 80.0, 40.0))
        .with_region(RegionId::Toolbar, Rect::new(560.0, 10.0, 300.0, 60.0))
}

#[test]
fn test_startup_loads_settings_lists_displays_and_enables_click_through() {
    let mut h = Harness::new();
    let outbox = h.send(UiEvent::Started);

    assert_eq!(outbox.tasks, vec![Task::LoadSettings, Task::ListDisplays]);
    assert_eq!(
        h.recorder.window(),
        vec![
            WindowCommand::SetClickThrough(true),
            WindowCommand::RefreshStealthStatus
        ]
    );
    assert!(h.view().click_through);
}

#[test]
fn test_start_select_claude_activates_session() {
    let mut h = started();

    h.send(UiEvent::Click(RegionId::StartButton));
    assert!(h.view().selector_visible);

    h.send(UiEvent::SelectService(AiService::Claude));
    let view = h.view();
    assert!(!view.selector_visible);
    assert!(view.session.active);
    assert_eq!(view.session.service, Some(AiService::Claude));
    assert_eq!(view.session.control_label, "Stop");
    assert_eq!(
        h.recorder.webview(),
        vec![
            WebviewCommand::Load("https://claude.ai/new".to_string()),
            WebviewCommand::Show
        ]
    );

    // Start again acts as Stop
    h.send(UiEvent::Click(RegionId::StartButton));
    assert!(!h.view().session.active);
    assert_eq!(h.view().session.control_label, "Start");
    assert_eq!(h.recorder.webview().last(), Some(&WebviewCommand::Hide));
}

#[test]
fn test_clicking_start_hides_the_settings_panel() {
    let mut h = started();
    h.send(UiEvent::PointerEnter(RegionId::SettingsButton));
    assert!(h.view().panel.visible);

    h.send(UiEvent::Click(RegionId::StartButton));
    assert!(!h.view().panel.visible);
    assert!(h.view().selector_visible);
}

#[test]
fn test_selection_without_selector_is_ignored() {
    let mut h = started();
    h.send(UiEvent::SelectService(AiService::Gemini));
    assert!(!h.view().session.active);
    assert!(h.recorder.webview().is_empty());
}

#[test]
fn test_cancel_selector_leaves_session_idle() {
    let mut h = started();
    h.send(UiEvent::Click(RegionId::StartButton));
    h.send(UiEvent::CancelServiceSelector);
    assert!(!h.view().selector_visible);
    h.send(UiEvent::SelectService(AiService::Claude));
    assert!(!h.view().session.active);
}

#[test]
fn test_webview_close_stops_session() {
    let mut h = started();
    h.send(UiEvent::Click(RegionId::StartButton));
    h.send(UiEvent::SelectService(AiService::ChatGpt));
    h.send(UiEvent::WebviewClose);
    assert!(!h.view().session.active);

    // Closing again is a no-op
    h.recorder.clear();
    h.send(UiEvent::WebviewClose);
    assert!(h.recorder.webview().is_empty());
}

#[test]
fn test_navigation_requires_active_session() {
    let mut h = started();
    h.send(UiEvent::WebviewReload);
    assert!(h.recorder.webview().is_empty());

    h.send(UiEvent::Click(RegionId::StartButton));
    h.send(UiEvent::SelectService(AiService::Gemini));
    h.recorder.clear();
    h.send(UiEvent::WebviewBack);
    h.send(UiEvent::WebviewForward);
    h.send(UiEvent::WebviewReload);
    assert_eq!(
        h.recorder.webview(),
        vec![
            WebviewCommand::GoBack,
            WebviewCommand::GoForward,
            WebviewCommand::Reload
        ]
    );
}

#[test]
fn test_webview_ready_updates_status_and_sends_context() {
    let mut h = started();
    h.send(UiEvent::SetLanguages {
        output_lang: Some("fr".to_string()),
        code_lang: Some("rust".to_string()),
    });
    assert!(matches!(h.take_tasks().as_slice(), [Task::PersistSettings(_)]));

    h.send(UiEvent::Click(RegionId::StartButton));
    h.send(UiEvent::SelectService(AiService::Gemini));
    assert_eq!(h.view().session.status, "Loading Gemini (Google)...");

    h.send(UiEvent::SendContext);
    h.send(UiEvent::WebviewReady);
    assert_eq!(h.view().session.status, "Gemini (Google) - Ready");

    let evals: Vec<String> = h
        .recorder
        .webview()
        .into_iter()
        .filter_map(|c| match c {
            WebviewCommand::Eval(s) => Some(s),
            _ => None,
        })
        .collect();
    assert_eq!(evals.len(), 2);
    assert!(evals[1].contains("working on a Rust problem"));
    assert!(evals[1].contains("in French."));
}

#[test]
fn test_fresh_install_schedules_tutorial_after_one_second() {
    let mut h = Harness::new();
    h.send(UiEvent::Started);
    let outbox = h.send(UiEvent::SettingsLoaded(Ok(Settings::default())));
    assert_eq!(
        outbox.timers,
        vec![(
            std::time::Duration::from_millis(1000),
            Timer::TutorialAutoShow
        )]
    );

    h.recorder.clear();
    h.fire_where(|t| *t == Timer::TutorialAutoShow);
    let step = h.view().tutorial.expect("tutorial visible");
    assert_eq!((step.number, step.total), (1, 6));
    assert!(!h.view().click_through);
    assert_eq!(
        h.recorder.window(),
        vec![
            WindowCommand::ResetToFullExtent,
            WindowCommand::SetClickThrough(false)
        ]
    );
}

#[test]
fn test_seen_tutorial_is_not_scheduled() {
    let mut h = Harness::new();
    h.send(UiEvent::Started);
    let outbox = h.send(UiEvent::SettingsLoaded(Ok(settings_seen())));
    assert!(outbox.timers.is_empty());
}

#[test]
fn test_failed_settings_load_falls_back_to_fresh_install() {
    let mut h = Harness::new();
    let outbox = h.send(UiEvent::SettingsLoaded(Err(HostError::Io("denied".into()))));
    assert_eq!(outbox.timers.len(), 1);
}

#[test]
fn test_tutorial_suppresses_click_through_and_drag() {
    let mut h = started();
    h.send(UiEvent::LayoutChanged(layout()));
    h.send(UiEvent::Click(RegionId::TutorialButton));
    assert!(h.overlay.tutorial().is_active());

    h.recorder.clear();
    h.send(UiEvent::PointerEnter(RegionId::Toolbar));
    h.send(UiEvent::PointerLeave(RegionId::Toolbar));
    assert_eq!(h.recorder.click_through_calls(), vec![false]);
    assert!(!h.view().click_through);

    h.send(UiEvent::PointerDown {
        region: RegionId::DragHandle,
        screen: Point::new(0, 0),
    });
    h.send(UiEvent::PointerMove {
        screen: Point::new(40, 40),
    });
    assert!(!h.view().dragging);
    assert!(h.timers.is_empty());
}

#[test]
fn test_tutorial_walkthrough_spotlights_and_finishes() {
    let mut h = Harness::new();
    h.send(UiEvent::Started);
    h.send(UiEvent::SettingsLoaded(Ok(Settings::default())));
    h.send(UiEvent::LayoutChanged(layout()));
    h.fire_where(|t| *t == Timer::TutorialAutoShow);
    h.take_tasks();

    h.send(UiEvent::TutorialPrev);
    assert_eq!(h.view().tutorial.unwrap().number, 1);

    h.send(UiEvent::TutorialNext);
    let step = h.view().tutorial.unwrap();
    assert_eq!(step.number, 2);
    assert_eq!(step.spotlight, Some(Rect::new(590.0, 10.0, 60.0, 60.0)));
    assert_eq!(step.card, CardPlacement::Below { top: 80.0, left: 620.0 });
    assert!(step.prev_enabled);

    for _ in 0..4 {
        h.send(UiEvent::TutorialNext);
    }
    let step = h.view().tutorial.unwrap();
    assert_eq!(step.number, 6);
    assert_eq!(step.next_label, "Finish ✓");

    h.send(UiEvent::TutorialNext);
    assert!(h.view().tutorial.is_none());
    assert!(h.view().click_through);

    match h.take_tasks().as_slice() {
        [Task::PersistSettings(settings)] => assert!(settings.has_seen_tutorial),
        other => panic!("expected one persist, got {:?}", other),
    }
    assert!(h.overlay.settings().has_seen_tutorial);
}

#[test]
fn test_closing_tutorial_over_hovered_toolbar_keeps_window_interactive() {
    let mut h = started();
    h.send(UiEvent::Click(RegionId::TutorialButton));
    h.send(UiEvent::PointerEnter(RegionId::Toolbar));
    h.send(UiEvent::TutorialClose);

    assert!(!h.view().click_through);
    // Already seen: no second persist
    assert!(h.take_tasks().is_empty());

    h.send(UiEvent::TutorialClose);
    h.send(UiEvent::PointerLeave(RegionId::Toolbar));
    assert!(h.view().click_through);
}

#[test]
fn test_layout_change_rerenders_active_tutorial() {
    let mut h = started();
    h.send(UiEvent::Click(RegionId::TutorialButton));
    h.send(UiEvent::TutorialNext);
    assert_eq!(h.view().tutorial.unwrap().card, CardPlacement::Centered);

    h.send(UiEvent::LayoutChanged(layout()));
    assert!(matches!(
        h.view().tutorial.unwrap().card,
        CardPlacement::Below { .. }
    ));
}

#[test]
fn test_drag_moves_are_coalesced_per_frame() {
    let mut h = started();
    h.send(UiEvent::PointerDown {
        region: RegionId::DragHandle,
        screen: Point::new(100, 100),
    });
    for i in 1..=10 {
        h.send(UiEvent::PointerMove {
            screen: Point::new(100 + i * 2, 100 - i),
        });
    }
    assert_eq!(h.timers.len(), 1);
    assert!(h.view().dragging);

    h.fire_where(|t| matches!(t, Timer::AnimationFrame { .. }));
    assert_eq!(h.recorder.moves(), vec![Delta::new(20, -10)]);

    h.send(UiEvent::PointerMove {
        screen: Point::new(125, 90),
    });
    h.send(UiEvent::PointerUp);
    h.fire_where(|t| matches!(t, Timer::AnimationFrame { .. }));
    assert_eq!(h.recorder.moves().len(), 1);
    assert!(!h.view().dragging);
}

#[test]
fn test_out_of_range_drag_frame_never_reaches_window() {
    let mut h = started();
    h.send(UiEvent::PointerDown {
        region: RegionId::DragHandle,
        screen: Point::new(100, 100),
    });
    h.send(UiEvent::PointerMove {
        screen: Point::new(6100, 100),
    });
    h.fire_where(|t| matches!(t, Timer::AnimationFrame { .. }));
    assert!(h.recorder.moves().is_empty());

    // The drag carries on with sane deltas.
    h.send(UiEvent::PointerMove {
        screen: Point::new(6110, 95),
    });
    h.fire_where(|t| matches!(t, Timer::AnimationFrame { .. }));
    assert_eq!(h.recorder.moves(), vec![Delta::new(10, -5)]);
}

#[test]
fn test_pointer_down_outside_handle_does_not_drag() {
    let mut h = started();
    h.send(UiEvent::PointerDown {
        region: RegionId::Toolbar,
        screen: Point::new(0, 0),
    });
    h.send(UiEvent::PointerMove {
        screen: Point::new(5, 5),
    });
    assert!(h.timers.is_empty());
}

#[test]
fn test_settings_hover_scenario_hides_after_full_sequence() {
    let mut h = started();
    h.send(UiEvent::PointerEnter(RegionId::SettingsButton));
    h.send(UiEvent::PointerLeave(RegionId::SettingsButton));
    h.send(UiEvent::PointerEnter(RegionId::SettingsPanel));
    h.send(UiEvent::PointerLeave(RegionId::SettingsPanel));

    // Both leave checks fire; only the one armed after the last re-entry counts
    h.fire_where(|t| matches!(t, Timer::PanelLeaveCheck { .. }));
    assert_eq!(h.overlay.panel().phase(), PanelPhase::Visible);
    h.fire_where(|t| matches!(t, Timer::PanelIdle { .. }));
    assert!(h.view().panel.fading);
    h.fire_where(|t| matches!(t, Timer::PanelFade { .. }));
    assert!(!h.view().panel.visible);
    assert!(h.timers.is_empty());
}

#[test]
fn test_panel_show_refreshes_stealth_status() {
    let mut h = started();
    h.send(UiEvent::PointerEnter(RegionId::SettingsButton));
    assert_eq!(h.recorder.window(), vec![WindowCommand::RefreshStealthStatus]);

    h.send(UiEvent::StealthReported(StealthStatus {
        success: true,
        platform: "windows".into(),
        version: "10".into(),
    }));
    assert_eq!(h.view().stealth.unwrap().label, "Active");
}

#[test]
fn test_screenshot_without_session_warns() {
    let mut h = started();
    let outbox = h.send(UiEvent::Click(RegionId::ScreenshotButton));
    assert_eq!(outbox.tasks, vec![Task::CaptureScreen]);

    h.send(UiEvent::ScreenCaptured(Ok(Screenshot::new(1, 1, vec![0; 4]))));
    assert_eq!(
        h.recorder.notices(),
        vec![Notice::Alert("Please start the interview first!".to_string())]
    );
    assert!(h.take_tasks().iter().all(|t| *t == Task::CaptureScreen));
}

#[test]
fn test_screenshot_failure_is_reported() {
    let mut h = started();
    h.send(UiEvent::ScreenCaptured(Err(HostError::PermissionDenied(
        "screen recording".into(),
    ))));
    assert_eq!(
        h.recorder.notices(),
        vec![Notice::Alert(
            "Failed to capture screenshot: permission denied: screen recording".to_string()
        )]
    );
}

#[test]
fn test_screenshot_with_session_pastes_after_delay() {
    let mut h = started();
    h.send(UiEvent::Click(RegionId::StartButton));
    h.send(UiEvent::SelectService(AiService::ChatGpt));
    h.take_tasks();
    h.recorder.clear();

    let shot = Screenshot::new(1, 1, vec![1; 4]);
    h.send(UiEvent::Shortcut(ShortcutCommand::Screenshot));
    assert_eq!(h.take_tasks(), vec![Task::CaptureScreen]);

    h.send(UiEvent::ScreenCaptured(Ok(shot.clone())));
    assert_eq!(h.take_tasks(), vec![Task::WriteClipboard(shot)]);

    let outbox = h.send(UiEvent::ClipboardWritten(Ok(())));
    assert_eq!(
        outbox.timers,
        vec![(
            std::time::Duration::from_millis(300),
            Timer::ScreenshotPaste
        )]
    );
    assert_eq!(h.recorder.webview(), vec![WebviewCommand::Focus]);

    h.fire_where(|t| *t == Timer::ScreenshotPaste);
    match h.recorder.webview().last() {
        Some(WebviewCommand::Eval(script)) => {
            assert!(script.contains("execCommand('paste')"));
            assert!(script.contains("#prompt-textarea"));
        }
        other => panic!("expected paste script, got {:?}", other),
    }
}

#[test]
fn test_empty_display_list_yields_single_primary_entry() {
    let mut h = started();
    h.send(UiEvent::DisplaysListed(Ok(vec![])));
    let view = h.view();
    assert_eq!(view.displays.len(), 1);
    assert_eq!(view.displays[0].label, "Display 1 (Primary)");

    h.send(UiEvent::DisplaysListed(Err(HostError::Other("no monitors".into()))));
    assert_eq!(h.view().displays.len(), 1);
}

#[test]
fn test_saved_display_is_restored_and_choice_persisted() {
    let mut h = Harness::new();
    h.send(UiEvent::SettingsLoaded(Ok(Settings {
        has_seen_tutorial: true,
        selected_display: Some(1),
        ..Settings::default()
    })));
    h.send(UiEvent::DisplaysListed(Ok(vec![display(0, true), display(1, false)])));
    let view = h.view();
    assert_eq!(view.selected_display, 1);
    assert_eq!(view.displays[0].label, "Display 1 (Primary) - 1920 x 1080");
    assert_eq!(view.displays[1].label, "Display 2 - 1920 x 1080");

    h.take_tasks();
    h.recorder.clear();
    h.send(UiEvent::DisplayHovered(0));
    h.send(UiEvent::DisplayChosen(0));
    h.send(UiEvent::DisplayChosen(7));
    assert_eq!(
        h.recorder.window(),
        vec![
            WindowCommand::ShowDisplayIndicator(0),
            WindowCommand::ShowDisplayIndicator(0)
        ]
    );
    match h.take_tasks().as_slice() {
        [Task::PersistSettings(settings)] => assert_eq!(settings.selected_display, Some(0)),
        other => panic!("expected one persist, got {:?}", other),
    }
}

#[test]
fn test_shortcuts_map_to_commands() {
    let mut h = started();
    h.send(UiEvent::Shortcut(ShortcutCommand::ToggleVisibility));
    h.send(UiEvent::Shortcut(ShortcutCommand::ToggleVoice));
    assert_eq!(h.recorder.window(), vec![WindowCommand::ToggleVisibility]);
    assert_eq!(h.recorder.notices(), vec![Notice::VoiceToggle]);
}

#[test]
fn test_quit_button_quits() {
    let mut h = started();
    h.send(UiEvent::Click(RegionId::QuitButton));
    assert_eq!(h.recorder.window(), vec![WindowCommand::Quit]);
}

#[test]
fn test_unavailable_window_is_dropped_silently() {
    let mut h = started();
    h.recorder.set_window_unavailable(true);
    h.send(UiEvent::PointerEnter(RegionId::Toolbar));
    h.send(UiEvent::Shortcut(ShortcutCommand::ToggleVisibility));
    assert!(h.recorder.window().is_empty());
    // State still follows the hover
    assert!(!h.view().click_through);
}

#[test]
fn test_sign_in_validates_before_calling_backend() {
    let mut h = started();
    h.send(UiEvent::SignIn {
        email: "not-an-email".into(),
        password: Secret::new("password123"),
    });
    assert_eq!(
        h.overlay.auth_status(),
        &AuthStatus::Failed {
            form: AuthForm::Login,
            message: "Login failed: Please enter a valid email address".into()
        }
    );
    assert!(h.take_tasks().is_empty());

    h.send(UiEvent::SignIn {
        email: " bee@hive.io ".into(),
        password: Secret::new("password123"),
    });
    assert_eq!(h.overlay.auth_status(), &AuthStatus::Pending);
    match h.take_tasks().as_slice() {
        [Task::SignIn { email, .. }] => assert_eq!(email, "bee@hive.io"),
        other => panic!("expected sign-in task, got {:?}", other),
    }

    h.send(UiEvent::AuthFinished(Ok(user())));
    assert_eq!(
        h.overlay.auth_status(),
        &AuthStatus::SignedIn { user: user() }
    );
}

#[test]
fn test_sign_up_errors_are_friendly() {
    let mut h = started();
    h.send(UiEvent::SignUp {
        email: "bee@hive.io".into(),
        password: Secret::new("password123"),
        name: "Bee".into(),
    });
    h.send(UiEvent::AuthFinished(Err(AuthError::Backend(
        "User already registered".into(),
    ))));
    assert_eq!(
        h.overlay.auth_status(),
        &AuthStatus::Failed {
            form: AuthForm::Signup,
            message: "Signup failed: This email is already registered. Please log in instead"
                .into()
        }
    );
}

#[test]
fn test_oauth_completes_out_of_band() {
    let mut h = started();
    h.send(UiEvent::SignInWithOAuth(OAuthProvider::GitHub));
    assert_eq!(h.take_tasks(), vec![Task::SignInWithOAuth(OAuthProvider::GitHub)]);
    h.send(UiEvent::OAuthStarted(Ok(())));
    assert_eq!(h.overlay.auth_status(), &AuthStatus::Pending);

    h.send(UiEvent::OAuthFinished(Ok(user())));
    assert!(matches!(h.overlay.auth_status(), AuthStatus::SignedIn { .. }));
}

#[test]
fn test_views_are_only_rendered_on_change() {
    let mut h = started();
    let before = h.recorder.render_count();
    h.send(UiEvent::PointerUp);
    h.send(UiEvent::WebviewReload);
    assert_eq!(h.recorder.render_count(), before);

    h.send(UiEvent::PointerEnter(RegionId::Webview));
    assert_eq!(h.recorder.render_count(), before + 1);
}

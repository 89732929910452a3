use serde::Serialize;

use crate::region::RegionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MascotSize {
    Default,
    Large,
    ExtraLarge,
    Mega,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MascotPlacement {
    Default,
    Top,
    Right,
}

/// Guide bee pose shown next to the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Mascot {
    pub image: &'static str,
    pub size: MascotSize,
    pub placement: MascotPlacement,
}

impl Mascot {
    const fn new(image: &'static str, size: MascotSize, placement: MascotPlacement) -> Self {
        Self {
            image,
            size,
            placement,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TutorialStep {
    pub icon: &'static str,
    pub title: &'static str,
    /// May contain inline `<kbd>` markup.
    pub description: &'static str,
    pub spotlight: Option<RegionId>,
    pub mascot: Mascot,
}

pub static DEFAULT_STEPS: &[TutorialStep] = &[
    TutorialStep {
        icon: "👋",
        title: "Welcome to BuzzBuzzGPTs!",
        description: "Your AI-powered interview assistant. Let me show you how to use all the features in just a few quick steps!",
        spotlight: None,
        mascot: Mascot::new("logos/wave-bee.png", MascotSize::Large, MascotPlacement::Default),
    },
    TutorialStep {
        icon: "🐝",
        title: "Drag the Bee to Move",
        description: "Click and hold the bee button to drag the entire menu anywhere on your screen. Position it wherever you need it!",
        spotlight: Some(RegionId::DragHandle),
        mascot: Mascot::new("logos/pointing-bee.png", MascotSize::Large, MascotPlacement::Default),
    },
    TutorialStep {
        icon: "🎯",
        title: "Start Your Interview",
        description: "Click \"Start Interview\" to choose an AI assistant. Pick from ChatGPT, Gemini, Claude, Perplexity or OpenRouter!",
        spotlight: Some(RegionId::StartButton),
        mascot: Mascot::new("logos/business-bee.png", MascotSize::ExtraLarge, MascotPlacement::Default),
    },
    TutorialStep {
        icon: "🎛️",
        title: "Control Toolbar",
        description: "When you start an interview, this toolbar appears with the Screenshot (<kbd>Alt</kbd> + <kbd>S</kbd>) button. Use it to capture your screen and paste it directly into the AI assistant!",
        spotlight: Some(RegionId::Toolbar),
        mascot: Mascot::new("logos/wrench-bee.png", MascotSize::Large, MascotPlacement::Right),
    },
    TutorialStep {
        icon: "⚙️",
        title: "Customize Settings",
        description: "Hover the settings gear to configure the display and languages, and to view all keyboard shortcuts.",
        spotlight: Some(RegionId::SettingsButton),
        mascot: Mascot::new("logos/pointing-bee.png", MascotSize::Default, MascotPlacement::Default),
    },
    TutorialStep {
        icon: "✨",
        title: "You're Ready!",
        description: "Click \"Start Interview\" to begin. The app is invisible in screen recordings (stealth mode). Good luck!",
        spotlight: None,
        mascot: Mascot::new("logos/trophy-bee.png", MascotSize::Mega, MascotPlacement::Top),
    },
];

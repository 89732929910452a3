use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Web-based AI chat providers the embedded view can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiService {
    ChatGpt,
    Gemini,
    Claude,
    Perplexity,
    OpenRouter,
}

/// Fallback input selectors when a service has none of its own.
pub const GENERIC_INPUT_SELECTORS: &[&str] = &["textarea", "div[contenteditable=\"true\"]"];

impl AiService {
    pub const ALL: [AiService; 5] = [
        AiService::ChatGpt,
        AiService::Gemini,
        AiService::Claude,
        AiService::Perplexity,
        AiService::OpenRouter,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            AiService::ChatGpt => "chatgpt",
            AiService::Gemini => "gemini",
            AiService::Claude => "claude",
            AiService::Perplexity => "perplexity",
            AiService::OpenRouter => "openrouter",
        }
    }

    pub fn url(&self) -> &'static str {
        match self {
            AiService::ChatGpt => "https://chat.openai.com",
            AiService::Gemini => "https://gemini.google.com",
            AiService::Claude => "https://claude.ai/new",
            AiService::Perplexity => "https://www.perplexity.ai",
            AiService::OpenRouter => "https://openrouter.ai/chat",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AiService::ChatGpt => "ChatGPT (OpenAI)",
            AiService::Gemini => "Gemini (Google)",
            AiService::Claude => "Claude (Anthropic)",
            AiService::Perplexity => "Perplexity AI",
            AiService::OpenRouter => "OpenRouter",
        }
    }

    /// Selectors for the chat input field, most specific first.
    pub fn input_selectors(&self) -> &'static [&'static str] {
        match self {
            AiService::ChatGpt => &[
                "textarea[data-id=\"root\"]",
                "textarea[placeholder*=\"Message\"]",
                "#prompt-textarea",
            ],
            AiService::Gemini => &["div[contenteditable=\"true\"]", ".ql-editor", "textarea"],
            AiService::Claude => &["div[contenteditable=\"true\"]", "textarea", "[role=\"textbox\"]"],
            AiService::Perplexity => &["textarea[placeholder*=\"Ask\"]", "textarea"],
            AiService::OpenRouter => &["textarea", "#chat-input"],
        }
    }
}

impl Default for AiService {
    fn default() -> Self {
        AiService::ChatGpt
    }
}

impl fmt::Display for AiService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown AI service: {0}")]
pub struct UnknownService(pub String);

impl FromStr for AiService {
    type Err = UnknownService;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AiService::ALL
            .into_iter()
            .find(|service| service.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownService(s.to_string()))
    }
}

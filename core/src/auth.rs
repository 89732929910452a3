//! Sign-in / sign-up flow in front of an external credential backend.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const MIN_PASSWORD_LENGTH: usize = 8;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    Google,
    GitHub,
}

impl OAuthProvider {
    pub fn id(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
            OAuthProvider::GitHub => "github",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "Google",
            OAuthProvider::GitHub => "GitHub",
        }
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for OAuthProvider {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(OAuthProvider::Google),
            "github" => Ok(OAuthProvider::GitHub),
            other => Err(AuthError::Backend(format!("unsupported provider: {}", other))),
        }
    }
}

/// A password that never shows up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters")]
    WeakPassword,
    #[error("Please enter your name")]
    MissingName,
    #[error("Authentication is not configured")]
    NotConfigured,
    #[error("Network error: {0}")]
    Network(String),
    #[error("{0}")]
    Backend(String),
}

/// Credential backend.
///
/// OAuth sign-in only starts the external flow; its outcome arrives later as
/// an out-of-band completion event.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;
    async fn sign_up(&self, email: &str, password: &str, name: &str) -> Result<AuthUser, AuthError>;
    async fn sign_in_with_oauth(&self, provider: OAuthProvider) -> Result<(), AuthError>;
}

/// Which form an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthForm {
    Login,
    Signup,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum AuthStatus {
    SignedOut,
    Pending,
    SignedIn { user: AuthUser },
    Failed { form: AuthForm, message: String },
}

impl Default for AuthStatus {
    fn default() -> Self {
        AuthStatus::SignedOut
    }
}

pub fn validate_email(email: &str) -> Result<(), AuthError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(AuthError::InvalidEmail)
    }
}

pub fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() >= MIN_PASSWORD_LENGTH {
        Ok(())
    } else {
        Err(AuthError::WeakPassword)
    }
}

pub fn validate_sign_in(email: &str, password: &str) -> Result<(), AuthError> {
    validate_email(email.trim())?;
    validate_password(password)
}

pub fn validate_sign_up(email: &str, password: &str, name: &str) -> Result<(), AuthError> {
    if name.trim().is_empty() {
        return Err(AuthError::MissingName);
    }
    validate_sign_in(email, password)
}

/// Turn a backend failure into the text shown under the form.
pub fn user_message(form: AuthForm, error: &AuthError) -> String {
    let detail = match error {
        AuthError::Network(_) => return "Network error. Please check your connection".to_string(),
        AuthError::Backend(raw) => friendly_backend_message(form, raw),
        other => other.to_string(),
    };

    match form {
        AuthForm::Login => format!("Login failed: {}", detail),
        AuthForm::Signup => format!("Signup failed: {}", detail),
    }
}

fn friendly_backend_message(form: AuthForm, raw: &str) -> String {
    let lower = raw.to_lowercase();
    if lower.contains("network") {
        return "Network error. Please check your connection".to_string();
    }
    match form {
        AuthForm::Login if lower.contains("invalid login credentials") => {
            "Invalid email or password".to_string()
        }
        AuthForm::Login if lower.contains("email not confirmed") => {
            "Please verify your email before logging in".to_string()
        }
        AuthForm::Signup if lower.contains("already registered") => {
            "This email is already registered. Please log in instead".to_string()
        }
        AuthForm::Signup if lower.contains("password") => {
            "Password is too weak. Please use a stronger password".to_string()
        }
        _ => raw.to_string(),
    }
}

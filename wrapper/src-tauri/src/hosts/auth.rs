//! Supabase GoTrue backend for sign-in and sign-up.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use buzz_core::auth::{AuthBackend, AuthError, AuthUser, OAuthProvider};
use buzz_core::config::AuthConfig;

#[derive(Debug, Clone, Deserialize)]
struct UserRecord {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: serde_json::Value,
}

impl UserRecord {
    fn into_user(self, fallback_email: &str) -> AuthUser {
        let name = self
            .user_metadata
            .get("name")
            .or_else(|| self.user_metadata.get("full_name"))
            .and_then(|v| v.as_str())
            .map(str::to_string);
        AuthUser {
            id: self.id,
            email: self.email.unwrap_or_else(|| fallback_email.to_string()),
            name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    user: UserRecord,
}

/// Sign-up returns a bare user while email confirmation is pending.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session(SessionResponse),
    User(UserRecord),
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

#[derive(Serialize)]
struct StoredSession<'a> {
    access_token: &'a str,
    refresh_token: Option<&'a str>,
    user: &'a AuthUser,
}

fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    parsed
        .error_description
        .or(parsed.msg)
        .or(parsed.message)
        .or(parsed.error)
        .unwrap_or_else(|| format!("Request failed with status {}", status))
}

pub struct SupabaseAuth {
    client: reqwest::Client,
    config: AuthConfig,
    session_file: Option<PathBuf>,
}

impl SupabaseAuth {
    pub fn new(config: AuthConfig, session_file: Option<PathBuf>) -> Self {
        if !config.is_configured() {
            warn!("Auth backend not configured; sign-in is disabled");
        }
        Self {
            client: reqwest::Client::new(),
            config,
            session_file,
        }
    }

    fn endpoint(&self, path: &str) -> Result<(String, &str), AuthError> {
        match (&self.config.url, &self.config.anon_key) {
            (Some(url), Some(key)) if self.config.is_configured() => {
                Ok((format!("{}/auth/v1/{}", url.trim_end_matches('/'), path), key))
            }
            _ => Err(AuthError::NotConfigured),
        }
    }

    async fn post(&self, path: &str, body: serde_json::Value) -> Result<String, AuthError> {
        let (url, key) = self.endpoint(path)?;
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("apikey", key)
            .bearer_auth(key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if status.is_success() {
            Ok(text)
        } else {
            Err(AuthError::Backend(error_message(status, &text)))
        }
    }

    async fn store_session(&self, session: &SessionResponse, user: &AuthUser) {
        let Some(path) = &self.session_file else {
            return;
        };
        let stored = StoredSession {
            access_token: &session.access_token,
            refresh_token: session.refresh_token.as_deref(),
            user,
        };
        let result = async {
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            let contents = serde_json::to_string_pretty(&stored)?;
            tokio::fs::write(path, contents).await?;
            anyhow::Ok(())
        }
        .await;

        match result {
            Ok(()) => debug!("Session saved to {:?}", path),
            Err(e) => warn!("Failed to save session: {}", e),
        }
    }
}

#[async_trait]
impl AuthBackend for SupabaseAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let body = self
            .post(
                "token?grant_type=password",
                json!({ "email": email, "password": password }),
            )
            .await?;
        let session: SessionResponse =
            serde_json::from_str(&body).map_err(|e| AuthError::Backend(e.to_string()))?;

        let user = session.user.clone().into_user(email);
        self.store_session(&session, &user).await;
        info!("Signed in as {}", user.email);
        Ok(user)
    }

    async fn sign_up(&self, email: &str, password: &str, name: &str) -> Result<AuthUser, AuthError> {
        let body = self
            .post(
                "signup",
                json!({ "email": email, "password": password, "data": { "name": name } }),
            )
            .await?;
        let response: SignUpResponse =
            serde_json::from_str(&body).map_err(|e| AuthError::Backend(e.to_string()))?;

        let user = match response {
            SignUpResponse::Session(session) => {
                let user = session.user.clone().into_user(email);
                self.store_session(&session, &user).await;
                user
            }
            SignUpResponse::User(record) => {
                info!("Sign-up pending email confirmation");
                record.into_user(email)
            }
        };
        Ok(AuthUser {
            name: user.name.or_else(|| Some(name.to_string())),
            ..user
        })
    }

    async fn sign_in_with_oauth(&self, provider: OAuthProvider) -> Result<(), AuthError> {
        let (url, _) = self.endpoint(&format!("authorize?provider={}", provider.id()))?;
        info!("Opening {} sign-in in the browser", provider.display_name());
        open::that(&url).map_err(|e| AuthError::Backend(e.to_string()))
    }
}

use thiserror::Error;

/// Failures reported by external collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The collaborator is not there (window closed, view not created yet).
    #[error("{0} is unavailable")]
    Unavailable(&'static str),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("no capturable screen source found")]
    NoSource,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("{0}")]
    Other(String),
}

impl HostError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, HostError::Unavailable(_))
    }
}

impl From<std::io::Error> for HostError {
    fn from(err: std::io::Error) -> Self {
        HostError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for HostError {
    fn from(err: serde_json::Error) -> Self {
        HostError::Other(err.to_string())
    }
}

impl From<crate::validation::ValidationError> for HostError {
    fn from(err: crate::validation::ValidationError) -> Self {
        HostError::InvalidInput(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("a session with {0} is already active; stop it first")]
    AlreadyActive(crate::service::AiService),
}

pub type HostResult<T> = std::result::Result<T, HostError>;

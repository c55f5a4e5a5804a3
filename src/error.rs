use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredentialError {
    /// The environment strategy was called while the resolver is in file mode.
    #[error("Credentials for '{exchange}' requested from environment without USE_ENV=true")]
    ModeMismatch { exchange: String },

    #[error("Secrets file {} unavailable: {}", .path.display(), .reason)]
    SourceUnavailable { path: PathBuf, reason: String },

    #[error("Could not determine the home directory of the current user")]
    HomeDirectoryUnavailable,
}

impl CredentialError {
    pub(crate) fn source_unavailable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        CredentialError::SourceUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CredentialError>;

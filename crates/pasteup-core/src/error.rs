//! Error types module
//!
//! Every failure a paste can run into is a `PasteError`. The pipeline reports the
//! `ErrorKind` of a failure to the user; only `LinkError` is recovered from (the direct
//! URL is inserted instead of a share link).

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like invalid input
    Debug,
    /// Warning level - for degraded but recoverable outcomes
    Warn,
    /// Error level - for failures that abort a paste
    Error,
}

/// Classification of a failure, as reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Clipboard bytes could not be materialized.
    Read,
    /// Folder probe or create failed.
    Folder,
    /// Remote write rejected.
    Upload,
    /// 401/403 from the remote store.
    Auth,
    /// Share link could not be created (non-fatal).
    Link,
    /// Transport-level failure (timeout, DNS, connection reset).
    Network,
    /// Static configuration is unusable.
    Config,
    /// A path, file name or request violated its invariants.
    Invalid,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            ErrorKind::Read => "ReadError",
            ErrorKind::Folder => "FolderError",
            ErrorKind::Upload => "UploadError",
            ErrorKind::Auth => "AuthError",
            ErrorKind::Link => "LinkError",
            ErrorKind::Network => "NetworkError",
            ErrorKind::Config => "ConfigError",
            ErrorKind::Invalid => "InvalidInput",
        };
        f.write_str(name)
    }
}

/// Metadata describing how an error should be surfaced.
pub trait ErrorMetadata {
    /// Taxonomy bucket for this error
    fn kind(&self) -> ErrorKind;

    /// Machine-readable error code (e.g., "UPLOAD_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether a later, user-initiated attempt could succeed
    fn is_recoverable(&self) -> bool;

    /// Message shown in the user-facing notification
    fn user_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasteError {
    #[error("Failed to read clipboard image: {0}")]
    Read(String),

    #[error("Folder '{segment}' could not be ensured: {message}")]
    Folder { segment: String, message: String },

    #[error("Upload failed{}: {message}", fmt_status(.status))]
    Upload {
        status: Option<u16>,
        message: String,
    },

    #[error("Authentication failed ({status}): {message}")]
    Auth { status: u16, message: String },

    #[error("Share link creation failed: {0}")]
    Link(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid remote path: {0}")]
    InvalidPath(String),

    #[error("Invalid upload request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

fn fmt_status(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({})", s)).unwrap_or_default()
}

/// Result type for paste operations
pub type PasteResult<T> = Result<T, PasteError>;

impl PasteError {
    /// Whether an HTTP status means the ambient credentials were rejected.
    pub fn is_auth_status(status: u16) -> bool {
        status == 401 || status == 403
    }

    /// Upload rejection for a status, routing 401/403 to `Auth`.
    pub fn upload_status(status: u16, body: &str) -> Self {
        if Self::is_auth_status(status) {
            PasteError::Auth {
                status,
                message: truncate_body(body),
            }
        } else {
            PasteError::Upload {
                status: Some(status),
                message: truncate_body(body),
            }
        }
    }

    /// Folder failure for a status, routing 401/403 to `Auth`.
    pub fn folder_status(segment: &str, status: u16, body: &str) -> Self {
        if Self::is_auth_status(status) {
            PasteError::Auth {
                status,
                message: format!("folder '{}': {}", segment, truncate_body(body)),
            }
        } else {
            PasteError::Folder {
                segment: segment.to_string(),
                message: format!("status {}: {}", status, truncate_body(body)),
            }
        }
    }

    /// True for the "target folder missing" upload rejection.
    pub fn is_missing_folder(&self) -> bool {
        matches!(
            self,
            PasteError::Upload {
                status: Some(404),
                ..
            }
        )
    }
}

/// Response bodies from Graph can be large HTML error pages; keep messages short.
fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "no response body".to_string();
    }
    match trimmed.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

impl From<serde_json::Error> for PasteError {
    fn from(err: serde_json::Error) -> Self {
        PasteError::Upload {
            status: None,
            message: format!("Unexpected response body: {}", err),
        }
    }
}

/// Static metadata for each variant: (kind, error_code, recoverable, log_level).
fn paste_error_static_metadata(err: &PasteError) -> (ErrorKind, &'static str, bool, LogLevel) {
    match err {
        PasteError::Read(_) => (ErrorKind::Read, "READ_ERROR", false, LogLevel::Error),
        PasteError::Folder { .. } => (ErrorKind::Folder, "FOLDER_ERROR", true, LogLevel::Error),
        PasteError::Upload { .. } => (ErrorKind::Upload, "UPLOAD_ERROR", true, LogLevel::Error),
        PasteError::Auth { .. } => (ErrorKind::Auth, "AUTH_ERROR", false, LogLevel::Warn),
        PasteError::Link(_) => (ErrorKind::Link, "LINK_ERROR", true, LogLevel::Warn),
        PasteError::Network(_) => (ErrorKind::Network, "NETWORK_ERROR", true, LogLevel::Error),
        PasteError::InvalidPath(_) | PasteError::InvalidRequest(_) => {
            (ErrorKind::Invalid, "INVALID_INPUT", false, LogLevel::Debug)
        }
        PasteError::Config(_) => (ErrorKind::Config, "CONFIG_ERROR", false, LogLevel::Error),
    }
}

impl ErrorMetadata for PasteError {
    fn kind(&self) -> ErrorKind {
        paste_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        paste_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        paste_error_static_metadata(self).2
    }

    fn user_message(&self) -> String {
        match self {
            PasteError::Auth { .. } => {
                "Authentication failed. Please make sure you are signed in to your cloud drive."
                    .to_string()
            }
            PasteError::Network(msg) => format!("Network error during upload: {}", msg),
            PasteError::Read(_) => "Failed to read image file".to_string(),
            other => other.to_string(),
        }
    }

    fn log_level(&self) -> LogLevel {
        paste_error_static_metadata(self).3
    }
}

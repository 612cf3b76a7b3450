// ===============================
// src/error.rs
// ===============================
use std::time::Duration;

use thiserror::Error;

/// Kegagalan di level HTTP / jaringan. Tidak ada retry.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("unexpected http status {status}")]
    Status { status: u16, body: String },
    #[error("request timed out after {after:?}")]
    Timeout { after: Duration },
    #[error("connection failed: {reason}")]
    Connect { reason: String },
}

#[derive(Debug, Error)]
pub enum YunxinError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("malformed response body: {reason}")]
    Decode { reason: String, body: String },

    /// Response well-formed, tapi `code != 200`. `body` = payload utuh dari server.
    #[error("business error code={code:?} msg={msg:?}")]
    Business {
        code: Option<i64>,
        msg: Option<String>,
        body: serde_json::Value,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("http client error: {0}")]
    Http(#[source] reqwest::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Decode,
    Business,
    Config,
    Http,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Decode => "decode",
            ErrorKind::Business => "business",
            ErrorKind::Config => "config",
            ErrorKind::Http => "http",
        }
    }
}

impl YunxinError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            YunxinError::Transport(_) => ErrorKind::Transport,
            YunxinError::Decode { .. } => ErrorKind::Decode,
            YunxinError::Business { .. } => ErrorKind::Business,
            YunxinError::Config(_) => ErrorKind::Config,
            YunxinError::Http(_) => ErrorKind::Http,
        }
    }

    /// Business code dari server (hanya untuk `Business`).
    pub fn business_code(&self) -> Option<i64> {
        match self {
            YunxinError::Business { code, .. } => *code,
            _ => None,
        }
    }

    /// HTTP status (hanya untuk `Transport(Status)`).
    pub fn http_status(&self) -> Option<u16> {
        match self {
            YunxinError::Transport(TransportError::Status { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, YunxinError>;

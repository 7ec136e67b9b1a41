use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Classification outcome for a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictKind {
    Phishing,
    Legitimate,
}

impl VerdictKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VerdictKind::Phishing => "phishing",
            VerdictKind::Legitimate => "legitimate",
        }
    }
}

/// A classification result as returned by the service.
///
/// `raw` keeps the full response body; the service may attach fields beyond
/// `result` (scores, feature breakdowns) that callers can inspect but this
/// system does not interpret. Verdicts are never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub kind: VerdictKind,
    pub raw: Value,
}

/// Failure of a classify, report or log request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: ApiFailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: ApiFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailureKind {
    InvalidUrl,
    Network,
    Timeout,
    HttpStatus(u16),
    InvalidBody,
}

impl fmt::Display for ApiFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailureKind::InvalidUrl => write!(f, "invalid url"),
            ApiFailureKind::Network => write!(f, "network error"),
            ApiFailureKind::Timeout => write!(f, "timeout"),
            ApiFailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            ApiFailureKind::InvalidBody => write!(f, "invalid response body"),
        }
    }
}

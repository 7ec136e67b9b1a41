//! Phishguard client: HTTP access to the remote classification service.
mod client;
mod types;

pub use client::{ClientSettings, HttpVerdictClient, VerdictClient};
pub use types::{ApiError, ApiFailureKind, Verdict, VerdictKind};

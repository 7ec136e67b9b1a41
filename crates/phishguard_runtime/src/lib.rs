//! Phishguard runtime: the three execution contexts and their wiring.
//!
//! A background coordinator routes typed messages between per-page blocking
//! agents and the popup status controller. Contexts share no memory; they
//! talk through channels, and request/reply correlation is a oneshot channel
//! per request.
mod coordinator;
mod page;
mod platform;
mod popup;
mod resolver;

pub use coordinator::{
    spawn_coordinator, CoordinatorError, CoordinatorHandle, PHISHING_DIALOG_TEXT,
};
pub use page::{PageAgent, PageSurface};
pub use platform::{DeliveryError, InProcessPlatform, Platform, PopupRefused};
pub use popup::{PopupController, REPORT_FAILURE_TEXT};
pub use resolver::resolve_target_tab;

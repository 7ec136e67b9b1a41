use std::sync::Arc;

use context_logging::{ctx_debug, ctx_error, in_context};
use phishguard_client::{VerdictClient, VerdictKind};
use phishguard_core::{Label, Msg, PopupStatus};

use crate::coordinator::CoordinatorHandle;
use crate::platform::Platform;

/// Generic text shown when a report submission fails.
pub const REPORT_FAILURE_TEXT: &str = "Error reporting URL";

/// Ephemeral popup context, built fresh on every open.
///
/// The popup never reuses a verdict computed elsewhere: it classifies the
/// active tab's URL itself, directly through the client, and settles on
/// exactly one terminal status. There is no retry logic; every failure is
/// terminal for that user action.
pub struct PopupController {
    client: Arc<dyn VerdictClient>,
    coordinator: CoordinatorHandle,
    url: Option<String>,
    status: PopupStatus,
}

impl PopupController {
    /// Opens the popup: logs the interaction, reads the active tab and runs
    /// an independent classification of its URL.
    pub async fn open(
        client: Arc<dyn VerdictClient>,
        coordinator: CoordinatorHandle,
        platform: &dyn Platform,
    ) -> Self {
        log_interaction_detached(&client, "popup_opened");

        let mut popup = Self {
            client,
            coordinator,
            url: None,
            status: PopupStatus::Checking,
        };

        match platform.query_active_tab().await {
            Some(tab) => {
                popup.url = Some(tab.url.clone());
                popup.status = match popup.client.classify(&tab.url).await {
                    Ok(verdict) if verdict.kind == VerdictKind::Phishing => PopupStatus::Phishing,
                    Ok(_) => PopupStatus::Safe,
                    Err(err) => {
                        ctx_error!("status check for {} failed: {err}", tab.url);
                        PopupStatus::Error(err.to_string())
                    }
                };
            }
            None => popup.status = PopupStatus::Error("No active tab".to_string()),
        }

        popup
    }

    pub fn status(&self) -> &PopupStatus {
        &self.status
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Submits the user's report for the displayed URL and returns the text
    /// to show: the backend's confirmation verbatim, or the generic failure
    /// message.
    pub async fn submit_report(&self, category: &str) -> String {
        let Some(url) = self.url.clone() else {
            return REPORT_FAILURE_TEXT.to_string();
        };
        let label = Label::from_category(category);
        log_interaction_detached(&self.client, "report_clicked");

        match self.coordinator.report_phishing(url, label).await {
            Ok(message) => message,
            Err(err) => {
                ctx_error!("report failed: {err}");
                REPORT_FAILURE_TEXT.to_string()
            }
        }
    }

    /// Applies a broadcast alert from the coordinator.
    pub fn handle_alert(&mut self, msg: &Msg) {
        if let Msg::ShowPhishingAlert { .. } = msg {
            self.status = PopupStatus::Phishing;
        }
    }
}

/// Fire-and-forget interaction log; losing it on teardown is acceptable.
fn log_interaction_detached(client: &Arc<dyn VerdictClient>, action: &'static str) {
    let client = client.clone();
    tokio::spawn(in_context("popup", async move {
        if let Err(err) = client.log_interaction(action).await {
            ctx_debug!("interaction log '{action}' dropped: {err}");
        }
    }));
}

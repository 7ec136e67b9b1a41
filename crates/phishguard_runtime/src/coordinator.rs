use std::sync::Arc;

use context_logging::{ctx_error, ctx_info, ctx_warn, in_context};
use phishguard_client::{ApiError, Verdict, VerdictClient, VerdictKind};
use phishguard_core::{Label, Msg, TabRef};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};

use crate::platform::Platform;
use crate::resolver::resolve_target_tab;

/// Fallback warning shown when the platform refuses to open the popup.
pub const PHISHING_DIALOG_TEXT: &str =
    "Warning: This website is a phishing attempt! The page has been blocked.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinatorError {
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The coordinator task or the reply channel is gone. Callers treat
    /// this as a failed check (fail-open for pages).
    #[error("background coordinator unreachable")]
    Unreachable,
}

enum Command {
    Check {
        url: String,
        sender_tab: Option<TabRef>,
        reply: oneshot::Sender<Result<Verdict, CoordinatorError>>,
    },
    Report {
        url: String,
        label: Label,
        reply: oneshot::Sender<Result<String, CoordinatorError>>,
    },
}

/// Cheap clonable handle other contexts use to reach the coordinator.
///
/// Each request carries its own oneshot reply channel, so a reply resolves
/// exactly once and fan-out between concurrent requests cannot cross wires.
#[derive(Clone)]
pub struct CoordinatorHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl CoordinatorHandle {
    /// Asks for a fresh classification of `url`. On a phishing verdict the
    /// coordinator also pushes a block instruction to the resolved tab and
    /// surfaces an alert before this returns.
    pub async fn check_url(
        &self,
        url: impl Into<String>,
        sender_tab: Option<TabRef>,
    ) -> Result<Verdict, CoordinatorError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Check {
                url: url.into(),
                sender_tab,
                reply,
            })
            .map_err(|_| CoordinatorError::Unreachable)?;
        rx.await.map_err(|_| CoordinatorError::Unreachable)?
    }

    /// Forwards a user report; returns the backend's confirmation message.
    pub async fn report_phishing(
        &self,
        url: impl Into<String>,
        label: Label,
    ) -> Result<String, CoordinatorError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(Command::Report {
                url: url.into(),
                label,
                reply,
            })
            .map_err(|_| CoordinatorError::Unreachable)?;
        rx.await.map_err(|_| CoordinatorError::Unreachable)?
    }
}

/// Starts the background coordinator and returns its handle.
///
/// The coordinator holds no per-message state; each inbound command runs in
/// its own task so a slow classification never delays other messages.
pub fn spawn_coordinator(
    client: Arc<dyn VerdictClient>,
    platform: Arc<dyn Platform>,
) -> CoordinatorHandle {
    let (tx, mut rx) = mpsc::unbounded_channel();
    tokio::spawn(in_context("background", async move {
        while let Some(command) = rx.recv().await {
            let client = client.clone();
            let platform = platform.clone();
            tokio::spawn(in_context(
                "background",
                handle_command(client, platform, command),
            ));
        }
    }));
    CoordinatorHandle { tx }
}

async fn handle_command(
    client: Arc<dyn VerdictClient>,
    platform: Arc<dyn Platform>,
    command: Command,
) {
    match command {
        Command::Check {
            url,
            sender_tab,
            reply,
        } => {
            let result = match client.classify(&url).await {
                Ok(verdict) => {
                    ctx_info!("verdict for {url}: {}", verdict.kind.as_str());
                    if verdict.kind == VerdictKind::Phishing {
                        block_and_alert(platform.as_ref(), sender_tab, &url).await;
                    }
                    Ok(verdict)
                }
                Err(err) => {
                    ctx_error!("classification failed for {url}: {err}");
                    Err(err.into())
                }
            };
            // Resolve the reply only after the whole chain has run, and
            // exactly once; a closed receiver means the page went away.
            let _ = reply.send(result);
        }
        Command::Report { url, label, reply } => {
            let result = client
                .report(&url, label.as_wire())
                .await
                .map_err(CoordinatorError::Api);
            if let Err(err) = &result {
                ctx_error!("report for {url} failed: {err}");
            }
            let _ = reply.send(result);
        }
    }
}

/// Phishing fan-out: at most one block instruction per check, then an alert.
async fn block_and_alert(platform: &dyn Platform, sender_tab: Option<TabRef>, url: &str) {
    match resolve_target_tab(sender_tab, platform).await {
        Some(tab) => {
            let push = platform
                .send_to_tab(tab.id, Msg::BlockPage { url: url.to_string() })
                .await;
            if let Err(err) = push {
                // The page context may have navigated away or closed in the
                // meantime; log and move on, no retry.
                ctx_warn!("blockPage delivery to {} failed: {err}", tab.id);
            }
        }
        None => ctx_warn!("no target tab found for blocking {url}"),
    }

    match platform.open_popup() {
        Ok(()) => platform.broadcast(Msg::ShowPhishingAlert {
            url: url.to_string(),
        }),
        Err(err) => {
            ctx_warn!("{err}; showing fallback dialog");
            platform.warning_dialog(PHISHING_DIALOG_TEXT);
        }
    }
}

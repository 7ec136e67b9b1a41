use std::collections::HashMap;
use std::sync::Mutex;

use context_logging::ctx_warn;
use phishguard_core::{Msg, TabId, TabRef};
use thiserror::Error;
use tokio::sync::{broadcast, mpsc};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("delivery failed: {0}")]
pub struct DeliveryError(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("popup open refused: {0}")]
pub struct PopupRefused(pub String);

/// Browser-level collaborators the coordinator depends on.
///
/// Every operation may fail (no active tab, target tab gone, popup blocked);
/// all failures are non-fatal for the caller.
#[async_trait::async_trait]
pub trait Platform: Send + Sync {
    /// The active tab of the focused window, if any.
    async fn query_active_tab(&self) -> Option<TabRef>;

    /// Delivers a message to the page context of one tab.
    async fn send_to_tab(&self, tab: TabId, msg: Msg) -> Result<(), DeliveryError>;

    /// Asks the platform to open the popup UI.
    fn open_popup(&self) -> Result<(), PopupRefused>;

    /// Broadcasts a notification to whatever popup instances exist.
    fn broadcast(&self, msg: Msg);

    /// Blocking warning dialog; fallback when the popup cannot be opened.
    fn warning_dialog(&self, text: &str);
}

struct TabEntry {
    url: String,
    inbox: mpsc::UnboundedSender<Msg>,
}

struct Inner {
    tabs: HashMap<TabId, TabEntry>,
    active: Option<TabId>,
    popup_openable: bool,
    dialogs: Vec<String>,
    next_tab: u64,
}

/// In-process [`Platform`]: a tab registry over unbounded channels.
///
/// Used by the demo binary and the integration tests. Each registered tab
/// owns the receiving half of its inbox; dropping it models the page
/// navigating away.
pub struct InProcessPlatform {
    inner: Mutex<Inner>,
    alerts: broadcast::Sender<Msg>,
}

impl Default for InProcessPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl InProcessPlatform {
    pub fn new() -> Self {
        let (alerts, _) = broadcast::channel(16);
        Self {
            inner: Mutex::new(Inner {
                tabs: HashMap::new(),
                active: None,
                popup_openable: true,
                dialogs: Vec::new(),
                next_tab: 1,
            }),
            alerts,
        }
    }

    /// Registers a new tab showing `url`, makes it the active tab and
    /// returns its reference together with the page context's inbox.
    pub fn open_tab(&self, url: impl Into<String>) -> (TabRef, mpsc::UnboundedReceiver<Msg>) {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let mut inner = self.inner.lock().expect("platform lock");
        let id = TabId(inner.next_tab);
        inner.next_tab += 1;
        let url = url.into();
        inner.tabs.insert(
            id,
            TabEntry {
                url: url.clone(),
                inbox: inbox_tx,
            },
        );
        inner.active = Some(id);
        (TabRef::new(id, url), inbox_rx)
    }

    /// Removes a tab, as when the user closes it.
    pub fn close_tab(&self, id: TabId) {
        let mut inner = self.inner.lock().expect("platform lock");
        inner.tabs.remove(&id);
        if inner.active == Some(id) {
            inner.active = None;
        }
    }

    /// Moves focus to another registered tab.
    pub fn activate_tab(&self, id: TabId) {
        let mut inner = self.inner.lock().expect("platform lock");
        if inner.tabs.contains_key(&id) {
            inner.active = Some(id);
        }
    }

    /// Controls whether `open_popup` succeeds; the real platform refuses
    /// without a user gesture.
    pub fn set_popup_openable(&self, openable: bool) {
        self.inner.lock().expect("platform lock").popup_openable = openable;
    }

    pub fn subscribe_alerts(&self) -> broadcast::Receiver<Msg> {
        self.alerts.subscribe()
    }

    /// Drains the warning dialogs shown so far.
    pub fn take_dialogs(&self) -> Vec<String> {
        std::mem::take(&mut self.inner.lock().expect("platform lock").dialogs)
    }
}

#[async_trait::async_trait]
impl Platform for InProcessPlatform {
    async fn query_active_tab(&self) -> Option<TabRef> {
        let inner = self.inner.lock().expect("platform lock");
        let id = inner.active?;
        inner
            .tabs
            .get(&id)
            .map(|entry| TabRef::new(id, entry.url.clone()))
    }

    async fn send_to_tab(&self, tab: TabId, msg: Msg) -> Result<(), DeliveryError> {
        let inner = self.inner.lock().expect("platform lock");
        match inner.tabs.get(&tab) {
            Some(entry) => entry
                .inbox
                .send(msg)
                .map_err(|_| DeliveryError(format!("page context for {tab} is gone"))),
            None => Err(DeliveryError(format!("no such tab {tab}"))),
        }
    }

    fn open_popup(&self) -> Result<(), PopupRefused> {
        if self.inner.lock().expect("platform lock").popup_openable {
            Ok(())
        } else {
            Err(PopupRefused("no user gesture".to_string()))
        }
    }

    fn broadcast(&self, msg: Msg) {
        // No subscriber is fine; the notification is best effort.
        let _ = self.alerts.send(msg);
    }

    fn warning_dialog(&self, text: &str) {
        ctx_warn!("dialog: {text}");
        self.inner
            .lock()
            .expect("platform lock")
            .dialogs
            .push(text.to_string());
    }
}

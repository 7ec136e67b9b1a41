use context_logging::{ctx_info, ctx_warn};
use phishguard_client::VerdictKind;
use phishguard_core::{BlockState, BlockTransition, Msg, TabRef};
use tokio::sync::mpsc;

use crate::coordinator::CoordinatorHandle;

/// Renders the terminal warning view of a blocked page.
///
/// Called at most once per page load, when the block transition happens.
pub trait PageSurface: Send {
    fn show_warning(&mut self);
}

/// Per-page context: runs once per page load, before rendering.
///
/// The agent has two independent trigger paths into the blocked state — its
/// own direct check reply, and a pushed `BlockPage` instruction whose tab
/// resolution may race with or duplicate the reply. Both funnel into the
/// same check-and-set, so order and duplication do not matter.
pub struct PageAgent {
    tab: TabRef,
    state: BlockState,
    surface: Box<dyn PageSurface>,
}

impl PageAgent {
    pub fn new(tab: TabRef, surface: Box<dyn PageSurface>) -> Self {
        Self {
            tab,
            state: BlockState::new(),
            surface,
        }
    }

    pub fn tab(&self) -> &TabRef {
        &self.tab
    }

    pub fn is_blocked(&self) -> bool {
        self.state.is_blocked()
    }

    /// Load-time check of the page's own URL; applies the direct reply.
    pub async fn check(&mut self, coordinator: &CoordinatorHandle) {
        let url = self.tab.url.clone();
        match coordinator.check_url(url.clone(), Some(self.tab.clone())).await {
            Ok(verdict) if verdict.kind == VerdictKind::Phishing => {
                self.block();
            }
            Ok(_) => ctx_info!("{url} looks legitimate"),
            Err(err) => {
                // Fail-open: a failed or undeliverable check never blocks
                // the page.
                ctx_warn!("check for {url} failed: {err}");
            }
        }
    }

    /// Handles an instruction pushed by the coordinator.
    pub fn handle_message(&mut self, msg: &Msg) {
        if let Msg::BlockPage { .. } = msg {
            self.block();
        }
    }

    /// Applies every instruction already delivered to this page's inbox.
    pub fn drain_inbox(&mut self, inbox: &mut mpsc::UnboundedReceiver<Msg>) {
        while let Ok(msg) = inbox.try_recv() {
            self.handle_message(&msg);
        }
    }

    fn block(&mut self) {
        if self.state.block() == BlockTransition::DidBlock {
            self.surface.show_warning();
            ctx_info!("page blocked: {}", self.tab.url);
        }
    }
}

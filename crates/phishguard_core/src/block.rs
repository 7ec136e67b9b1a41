/// Outcome of a [`BlockState::block`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTransition {
    /// This call performed the transition; render the warning now.
    DidBlock,
    /// The page was already blocked; nothing to do.
    AlreadyBlocked,
}

/// Per-page block flag, scoped to one page load.
///
/// The state is monotonic: it moves from unblocked to blocked at most once
/// and never back. Both trigger paths (the page agent's own check reply and
/// a coordinator-pushed block instruction) go through the same check-and-set
/// so that a duplicate or reordered trigger is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlockState {
    blocked: bool,
}

impl BlockState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check-and-set transition to blocked.
    pub fn block(&mut self) -> BlockTransition {
        if self.blocked {
            BlockTransition::AlreadyBlocked
        } else {
            self.blocked = true;
            BlockTransition::DidBlock
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked
    }
}

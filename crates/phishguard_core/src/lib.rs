//! Phishguard core: pure message, tab and block-state types.
mod block;
mod msg;
mod popup;
mod tab;

pub use block::{BlockState, BlockTransition};
pub use msg::{Label, Msg};
pub use popup::PopupStatus;
pub use tab::{TabId, TabRef};

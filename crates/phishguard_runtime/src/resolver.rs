use context_logging::ctx_debug;
use phishguard_core::TabRef;

use crate::platform::Platform;

/// Maps a message's origin to the single tab an action applies to.
///
/// A tab reference attached to the origin wins outright and costs no
/// platform query. Otherwise one round trip asks for the active tab of the
/// focused window. `None` is a normal outcome the caller must handle; it is
/// not an error.
pub async fn resolve_target_tab(
    sender_tab: Option<TabRef>,
    platform: &dyn Platform,
) -> Option<TabRef> {
    if let Some(tab) = sender_tab {
        return Some(tab);
    }
    // The fallback can land on the wrong tab if focus moved since the
    // message was sent; the origin's own reference avoids that entirely.
    ctx_debug!("message carried no tab reference; querying the active tab");
    platform.query_active_tab().await
}

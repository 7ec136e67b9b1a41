use std::fmt;

/// Opaque identifier for a single browser tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(pub u64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab#{}", self.0)
    }
}

/// A tab identifier together with the URL the tab currently shows.
///
/// Resolved lazily per message and never kept beyond the handling of that
/// message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabRef {
    pub id: TabId,
    pub url: String,
}

impl TabRef {
    pub fn new(id: TabId, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
        }
    }
}

/// True label a user assigns to a URL when reporting it.
///
/// The reporting backend expects the label as `0` (legitimate) or `1`
/// (phishing).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Legitimate,
    Phishing,
}

impl Label {
    /// Maps a report-form category to a label. Only the literal category
    /// `"phishing"` maps to [`Label::Phishing`]; everything else is treated
    /// as legitimate.
    pub fn from_category(category: &str) -> Self {
        if category == "phishing" {
            Label::Phishing
        } else {
            Label::Legitimate
        }
    }

    /// Wire encoding used by the reporting backend.
    pub fn as_wire(self) -> u8 {
        match self {
            Label::Legitimate => 0,
            Label::Phishing => 1,
        }
    }
}

/// Messages exchanged between the three execution contexts.
///
/// Messages are immutable and transient; each one corresponds to exactly one
/// logical event. Correlation of requests with replies is done through the
/// reply channel attached at send time, not through ids on the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Page agent asks the coordinator to classify its own URL.
    CheckUrl { url: String },
    /// Coordinator instructs a page agent to block its page.
    BlockPage { url: String },
    /// Coordinator notifies the popup that a phishing page was found.
    ShowPhishingAlert { url: String },
    /// Popup submits a user-corrected label for a URL.
    ReportPhishing { url: String, label: Label },
}

/// Terminal visual states of the popup status view.
///
/// The popup renders exactly one of these after its own classification of
/// the active tab's URL finishes. `Error` is distinct from both verdict
/// states so that a failed check is never mistaken for a safe page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PopupStatus {
    /// Classification still in flight.
    #[default]
    Checking,
    Safe,
    Phishing,
    /// Classification could not complete; carries a short reason.
    Error(String),
}

impl PopupStatus {
    /// Headline text shown for this status.
    pub fn headline(&self) -> &str {
        match self {
            PopupStatus::Checking => "Checking...",
            PopupStatus::Safe => "Safe: No Phishing Detected",
            PopupStatus::Phishing => "Warning: Phishing Detected!",
            PopupStatus::Error(_) => "Error: Could not check URL",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, PopupStatus::Checking)
    }
}

use phishguard_runtime::PageSurface;

/// Terminal rendering of the blocked-page warning view.
pub struct TerminalSurface;

impl PageSurface for TerminalSurface {
    fn show_warning(&mut self) {
        println!("==========================================");
        println!("Warning: Phishing Detected!");
        println!("This website is a phishing attempt and has been blocked for your safety.");
        println!("Please report this URL using the extension popup.");
        println!("==========================================");
    }
}

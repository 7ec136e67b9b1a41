#![allow(dead_code)]

use std::sync::atomic::AtomicUsize;
use std::sync::{Mutex, Once};

use phishguard_client::{ApiError, ApiFailureKind, Verdict, VerdictClient, VerdictKind};
use serde_json::json;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(context_logging::initialize_for_tests);
}

pub fn network_error() -> ApiError {
    ApiError {
        kind: ApiFailureKind::Network,
        message: "connection refused".to_string(),
    }
}

/// Scripted stand-in for the remote service.
pub struct MockVerdictClient {
    classify_reply: Result<VerdictKind, ApiError>,
    report_reply: Result<String, ApiError>,
    pub classify_calls: AtomicUsize,
    pub reports: Mutex<Vec<(String, u8)>>,
    pub logged_actions: Mutex<Vec<String>>,
}

impl MockVerdictClient {
    fn with_classify(classify_reply: Result<VerdictKind, ApiError>) -> Self {
        Self {
            classify_reply,
            report_reply: Ok("URL reported, thanks!".to_string()),
            classify_calls: AtomicUsize::new(0),
            reports: Mutex::new(Vec::new()),
            logged_actions: Mutex::new(Vec::new()),
        }
    }

    pub fn phishing() -> Self {
        Self::with_classify(Ok(VerdictKind::Phishing))
    }

    pub fn legitimate() -> Self {
        Self::with_classify(Ok(VerdictKind::Legitimate))
    }

    pub fn failing() -> Self {
        Self::with_classify(Err(network_error()))
    }

    pub fn with_report_reply(mut self, reply: Result<String, ApiError>) -> Self {
        self.report_reply = reply;
        self
    }
}

#[async_trait::async_trait]
impl VerdictClient for MockVerdictClient {
    async fn classify(&self, _url: &str) -> Result<Verdict, ApiError> {
        self.classify_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.classify_reply.clone().map(|kind| Verdict {
            kind,
            raw: json!({ "result": kind.as_str() }),
        })
    }

    async fn report(&self, url: &str, label: u8) -> Result<String, ApiError> {
        self.reports
            .lock()
            .unwrap()
            .push((url.to_string(), label));
        self.report_reply.clone()
    }

    async fn log_interaction(&self, action: &str) -> Result<(), ApiError> {
        self.logged_actions.lock().unwrap().push(action.to_string());
        Ok(())
    }
}

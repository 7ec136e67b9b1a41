use std::time::Duration;

use context_logging::ctx_debug;
use serde_json::{json, Value};

use crate::{ApiError, ApiFailureKind, Verdict, VerdictKind};

/// Connection settings for the classification service.
///
/// Both timeouts are always set; a hung request must fail with
/// [`ApiFailureKind::Timeout`] instead of hanging its context forever.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Access to the remote classification/report/log service.
///
/// The runtime only sees this trait; tests substitute scripted fakes.
#[async_trait::async_trait]
pub trait VerdictClient: Send + Sync {
    /// Asks the service whether `url` is phishing.
    async fn classify(&self, url: &str) -> Result<Verdict, ApiError>;

    /// Submits a user-corrected label (0 legitimate, 1 phishing) and returns
    /// the service's confirmation message.
    async fn report(&self, url: &str, label: u8) -> Result<String, ApiError>;

    /// Records a coarse interaction event. Callers are expected to treat
    /// failures as ignorable.
    async fn log_interaction(&self, action: &str) -> Result<(), ApiError>;
}

/// `reqwest`-backed [`VerdictClient`].
#[derive(Debug, Clone)]
pub struct HttpVerdictClient {
    settings: ClientSettings,
    http: reqwest::Client,
}

impl HttpVerdictClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(ApiFailureKind::Network, err.to_string()))?;
        Ok(Self { settings, http })
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, ApiError> {
        let joined = format!("{}/{}", self.settings.base_url.trim_end_matches('/'), path);
        reqwest::Url::parse(&joined)
            .map_err(|err| ApiError::new(ApiFailureKind::InvalidUrl, err.to_string()))
    }

    /// POSTs a JSON body and returns the response after the status check.
    async fn post_json(&self, path: &str, body: Value) -> Result<reqwest::Response, ApiError> {
        let url = self.endpoint(path)?;
        ctx_debug!("POST {url}");
        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                ApiFailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl VerdictClient for HttpVerdictClient {
    async fn classify(&self, url: &str) -> Result<Verdict, ApiError> {
        let response = self.post_json("predict", json!({ "url": url })).await?;
        let raw: Value = response
            .json()
            .await
            .map_err(|err| ApiError::new(ApiFailureKind::InvalidBody, err.to_string()))?;

        let kind = match raw.get("result").and_then(Value::as_str) {
            Some("phishing") => VerdictKind::Phishing,
            Some("legitimate") => VerdictKind::Legitimate,
            other => {
                return Err(ApiError::new(
                    ApiFailureKind::InvalidBody,
                    format!("unexpected result field: {other:?}"),
                ));
            }
        };

        Ok(Verdict { kind, raw })
    }

    async fn report(&self, url: &str, label: u8) -> Result<String, ApiError> {
        let response = self
            .post_json("report", json!({ "url": url, "label": label }))
            .await?;
        let raw: Value = response
            .json()
            .await
            .map_err(|err| ApiError::new(ApiFailureKind::InvalidBody, err.to_string()))?;

        match raw.get("message").and_then(Value::as_str) {
            Some(message) => Ok(message.to_string()),
            None => Err(ApiError::new(
                ApiFailureKind::InvalidBody,
                "missing message field",
            )),
        }
    }

    async fn log_interaction(&self, action: &str) -> Result<(), ApiError> {
        // Body is irrelevant; only delivery matters.
        self.post_json("log_interaction", json!({ "action": action }))
            .await
            .map(|_| ())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ApiFailureKind::Timeout, err.to_string());
    }
    ApiError::new(ApiFailureKind::Network, err.to_string())
}

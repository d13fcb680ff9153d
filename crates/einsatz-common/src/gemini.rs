use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::CommonError;
use crate::http::{read_limited_text, MAX_ERROR_BODY_BYTES};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Clone, Debug)]
pub struct GeminiConfig {
    /// Model identifier, e.g. "gemini-pro".
    pub model: String,
    /// API base URL. Overridable so tests can point at a dead endpoint.
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Client for the generateContent endpoint of the Gemini REST API.
///
/// The public operation never fails: any auth, network, quota, or decode
/// problem is logged and collapses to `None`. Failed requests are not
/// retried.
pub struct GeminiClient {
    config: GeminiConfig,
    api_key: String,
    http: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    // Absent when the model blocked the response.
    content: Option<Content>,
}

impl GeminiClient {
    /// Reads the credential from `GEMINI_API_KEY`. Construction fails hard
    /// when the variable is missing.
    pub fn new(config: GeminiConfig) -> Result<Self, CommonError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| CommonError::MissingCredential("GEMINI_API_KEY"))?;
        let http = reqwest::Client::builder()
            .user_agent("einsatz/gemini-client")
            .build()?;
        Ok(Self {
            config: GeminiConfig {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                ..config
            },
            api_key,
            http,
        })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Sends one prompt and returns the generated text, or `None` on any
    /// failure. Errors never propagate past this boundary.
    pub async fn generate(&self, prompt: &str) -> Option<String> {
        match self.request(prompt).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(model = %self.config.model, error = %e, "text generation failed");
                None
            }
        }
    }

    async fn request(&self, prompt: &str) -> Result<String, CommonError> {
        // The credential travels in a header, never in the URL: reqwest
        // errors render the full URL including the query string, and those
        // errors end up in the logs.
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .timeout(self.config.timeout)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = read_limited_text(resp, MAX_ERROR_BODY_BYTES).await;
            return Err(CommonError::Status { status, body });
        }

        let parsed = resp.json::<GenerateContentResponse>().await?;
        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or(CommonError::EmptyCompletion)
    }
}

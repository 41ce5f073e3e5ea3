//! LUIS v2 prediction client.
//!
//! Sends the lower-cased message to `/luis/v2.0/apps/{app_id}` and maps the
//! JSON prediction (`topScoringIntent`, `compositeEntities`) into a
//! [`Classification`]. Transport, status and decoding failures are returned
//! as distinct [`ClassifyError`] variants; nothing is retried.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use fm_protocol::{Classification, CompositeEntity, EntityChild, ScoredIntent};

use super::IntentClassifier;
use crate::error::{ClassifyError, ClassifyResult};

/// Connection settings for the LUIS application.
#[derive(Debug, Clone, Deserialize)]
pub struct LuisConfig {
    /// LUIS application id.
    #[serde(default)]
    pub app_id: String,
    /// Subscription (access) key.
    #[serde(default)]
    pub api_key: String,
    /// Endpoint host, e.g. `westus.api.cognitive.microsoft.com`.
    /// A value with an explicit `http://`/`https://` scheme is used as-is.
    #[serde(default = "default_hostname")]
    pub hostname: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Query the staging slot instead of production.
    #[serde(default)]
    pub staging: bool,
}

/// Longest slice of an error response body kept in [`ClassifyError::Status`].
pub const MAX_ERROR_BODY_CHARS: usize = 256;

fn default_hostname() -> String {
    "westus.api.cognitive.microsoft.com".into()
}
fn default_timeout_secs() -> u64 {
    5
}

impl Default for LuisConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            api_key: String::new(),
            hostname: default_hostname(),
            timeout_secs: default_timeout_secs(),
            staging: false,
        }
    }
}

impl LuisConfig {
    pub fn new(
        app_id: impl Into<String>,
        api_key: impl Into<String>,
        hostname: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            api_key: api_key.into(),
            hostname: hostname.into(),
            ..Self::default()
        }
    }

    /// Full prediction endpoint URL for the configured app.
    pub fn endpoint(&self) -> String {
        let host = self.hostname.trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            format!("{host}/luis/v2.0/apps/{}", self.app_id)
        } else {
            format!("https://{host}/luis/v2.0/apps/{}", self.app_id)
        }
    }
}

/// LUIS prediction response (only fields we need).
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LuisResponse {
    top_scoring_intent: Option<LuisIntent>,
    #[serde(default)]
    composite_entities: Option<Vec<LuisComposite>>,
}

#[derive(Deserialize)]
struct LuisIntent {
    intent: String,
    #[serde(default)]
    score: f64,
}

#[derive(Deserialize)]
struct LuisComposite {
    #[serde(default)]
    children: Vec<LuisChild>,
}

#[derive(Deserialize)]
struct LuisChild {
    #[serde(rename = "type")]
    kind: String,
    value: String,
}

impl From<LuisComposite> for CompositeEntity {
    fn from(c: LuisComposite) -> Self {
        CompositeEntity {
            children: c
                .children
                .into_iter()
                .map(|child| EntityChild {
                    role: child.kind,
                    value: child.value,
                })
                .collect(),
        }
    }
}

/// Client for a hosted LUIS application.
pub struct LuisClassifier {
    client: reqwest::Client,
    config: LuisConfig,
}

impl LuisClassifier {
    pub fn new(config: LuisConfig) -> ClassifyResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClassifyError::Request(format!("failed to build http client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &LuisConfig {
        &self.config
    }
}

#[async_trait]
impl IntentClassifier for LuisClassifier {
    async fn classify(&self, text: &str) -> ClassifyResult<Classification> {
        let query = text.to_lowercase();
        let mut params = vec![
            ("subscription-key", self.config.api_key.as_str()),
            ("q", query.as_str()),
            ("verbose", "false"),
        ];
        if self.config.staging {
            params.push(("staging", "true"));
        }

        let response = self
            .client
            .get(self.config.endpoint())
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClassifyError::Timeout {
                        timeout_ms: self.config.timeout_secs * 1000,
                    }
                } else {
                    // The URL carries the subscription key and the user's text.
                    ClassifyError::Request(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "luis returned non-success status");
            return Err(ClassifyError::Status {
                status: status.as_u16(),
                body: truncate_body(body.trim()),
            });
        }

        let body: LuisResponse = response
            .json()
            .await
            .map_err(|e| ClassifyError::Malformed(e.without_url().to_string()))?;

        let top = body
            .top_scoring_intent
            .ok_or_else(|| ClassifyError::Malformed("missing topScoringIntent".into()))?;

        tracing::debug!(intent = %top.intent, score = top.score, "luis prediction");

        Ok(Classification {
            top_intent: ScoredIntent {
                label: top.intent,
                score: top.score,
            },
            composite_entities: body
                .composite_entities
                .unwrap_or_default()
                .into_iter()
                .map(CompositeEntity::from)
                .collect(),
        })
    }

    fn name(&self) -> &str {
        "luis"
    }
}

fn truncate_body(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_string(),
    }
}

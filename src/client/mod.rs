//! The BFF screen client: fetches the JSON documents screens are built from.
//!
//! Screen-level code owns loading and fallback states; this client only turns
//! HTTP into typed documents. The backend's response casing drift (`UI` vs
//! `ui`) is absorbed here, at the serde boundary, so nothing downstream has
//! to care.

use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::path::Path;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::node::UiNode;

/// `status` as the backend reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenStatus {
    Success,
    Error,
}

/// The raw wire shape of a screen endpoint response.
#[derive(Debug, Deserialize)]
pub struct ScreenResponse {
    pub status: ScreenStatus,
    #[serde(default)]
    pub screen: String,
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default, alias = "UI")]
    pub ui: Vec<UiNode>,
    #[serde(default)]
    pub message: String,
}

impl ScreenResponse {
    /// Converts the response into a renderable document, turning a reported
    /// error status into a typed error carrying the backend's message.
    pub fn into_document(self) -> Result<ScreenDocument, ClientError> {
        match self.status {
            ScreenStatus::Success => Ok(ScreenDocument {
                screen: self.screen,
                data: self.data,
                ui: self.ui,
            }),
            ScreenStatus::Error => Err(ClientError::Backend(if self.message.is_empty() {
                "Failed to load UI".to_string()
            } else {
                self.message
            })),
        }
    }
}

/// One screen's renderable content: the node tree plus its context data.
#[derive(Debug, Default, Deserialize)]
pub struct ScreenDocument {
    #[serde(default)]
    pub screen: String,
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default, alias = "UI")]
    pub ui: Vec<UiNode>,
}

impl ScreenDocument {
    /// Loads a document from a JSON file (CLI and test fixtures).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let document = serde_json::from_str(&content)?;
        Ok(document)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Fetches screen documents and posts screen commands.
pub struct ScreenClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ScreenClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// GETs `<base>/<path>`, passing the shared phone number as a query
    /// parameter when one is known, and returns the renderable document.
    pub async fn fetch(
        &self,
        path: &str,
        phone: Option<&str>,
    ) -> Result<ScreenDocument, ClientError> {
        let mut url = self
            .config
            .base_url
            .join(path)
            .map_err(|err| ClientError::Decode {
                url: path.to_string(),
                message: err.to_string(),
            })?;
        if let Some(phone) = phone {
            url.query_pairs_mut().append_pair("phone", phone);
        }

        debug!(%url, "Fetching screen");
        let response = self
            .http
            .get(url.clone())
            .timeout(self.config.request_timeout)
            .send()
            .await
            .map_err(|source| ClientError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let screen: ScreenResponse =
            response.json().await.map_err(|err| ClientError::Decode {
                url: url.to_string(),
                message: err.to_string(),
            })?;
        screen.into_document()
    }

    /// POSTs the `{action, data}` shape screen command endpoints expect and
    /// returns the raw response payload for the caller to interpret.
    pub async fn post_command(
        &self,
        path: &str,
        name: &str,
        data: &Map<String, Value>,
    ) -> Result<Value, ClientError> {
        let url = self
            .config
            .base_url
            .join(path)
            .map_err(|err| ClientError::Decode {
                url: path.to_string(),
                message: err.to_string(),
            })?;

        debug!(%url, name, "Posting screen command");
        let response = self
            .http
            .post(url.clone())
            .timeout(self.config.request_timeout)
            .json(&json!({ "action": name, "data": data }))
            .send()
            .await
            .map_err(|source| ClientError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.json().await.map_err(|err| ClientError::Decode {
            url: url.to_string(),
            message: err.to_string(),
        })
    }
}

//! HTTP client for the swot-api sync endpoint.

use serde::Deserialize;

use swot_core::reconcile::MergeReport;
use swot_core::Quiz;

use crate::error::CliError;

/// Merged collection and report returned by `POST /v1/sync`
#[derive(Debug, Deserialize)]
pub struct SyncOutcome {
    pub quizzes: Vec<Quiz>,
    pub report: MergeReport,
}

pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, CliError> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(CliError::SyncServer(format!(
                "server URL '{base_url}' must start with http:// or https://"
            )));
        }
        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
        })
    }

    /// Post the local collection and receive the server-merged result.
    pub async fn sync(&self, quizzes: &[Quiz]) -> Result<SyncOutcome, CliError> {
        let response = self
            .client
            .post(format!("{}/v1/sync", self.base_url))
            .json(quizzes)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CliError::SyncServer(parse_server_error(status, &body)));
        }

        Ok(response.json::<SyncOutcome>().await?)
    }
}

#[derive(Debug, Deserialize)]
struct ServerErrorBody {
    error: Option<String>,
}

fn parse_server_error(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ServerErrorBody>(body) {
        if let Some(message) = payload.error {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{trimmed} ({})", status.as_u16())
    }
}
